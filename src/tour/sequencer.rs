use std::collections::HashSet;

use tracing::{debug, warn};

use crate::input::UiEvent;
use crate::page::{AnchorSelector, PageId};
use crate::store::ProgressStore;

use super::gate::AdvanceGate;
use super::progress::{PersistencePolicy, Progress};
use super::registry::StepRegistry;
use super::step::{Step, StepTarget};

/// Answers whether an anchor currently resolves on the active page.
///
/// Evaluated fresh at every decision point: anchors mount asynchronously,
/// so readiness is a condition, not a one-shot lookup.
pub trait ReadinessProbe {
    fn anchor_present(&self, anchor: &AnchorSelector) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceDirection {
    Forward,
    Backward,
}

/// Lifecycle signals reported by the highlight overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlaySignal {
    /// The displayed step closed via the overlay's next/back controls.
    StepAfter { direction: AdvanceDirection },
    /// The user walked through the final step.
    Finished,
    /// The user dismissed the tour early.
    Skipped,
}

/// Side effect the sequencer asks its owner to perform. The sequencer never
/// navigates itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TourEffect {
    Navigate(PageId),
}

enum AdvanceDecision {
    Complete,
    Hop(PageId),
    Move,
}

/// Drives a per-page ordered sequence of highlight steps: starts when the
/// page's anchors are ready, advances on overlay controls or gated user
/// actions, and hands off to the navigator on route-hop steps.
pub struct Sequencer {
    registry: StepRegistry,
    policy: PersistencePolicy,
    auto_start: bool,
    store: Box<dyn ProgressStore>,
    page: PageId,
    step_index: usize,
    running: bool,
    started_this_visit: bool,
    shown_pages: HashSet<PageId>,
    seen: bool,
    gate: Option<AdvanceGate>,
}

impl Sequencer {
    pub fn new(
        registry: StepRegistry,
        policy: PersistencePolicy,
        mut store: Box<dyn ProgressStore>,
        initial_page: PageId,
    ) -> Self {
        // The record is read exactly once, at mount.
        let persisted = match store.load() {
            Ok(progress) => progress,
            Err(err) => {
                warn!(error = %err, "failed to load tour progress, starting clean");
                None
            }
        };
        let seen = persisted.map(|p| p.seen).unwrap_or(false);
        let step_index = match (policy, persisted) {
            (PersistencePolicy::File, Some(p)) if !p.seen => p.step,
            _ => 0,
        };

        Self {
            registry,
            policy,
            auto_start: true,
            store,
            page: initial_page,
            step_index,
            running: false,
            started_this_visit: false,
            shown_pages: HashSet::new(),
            seen,
            gate: None,
        }
    }

    pub fn with_auto_start(mut self, auto_start: bool) -> Self {
        self.auto_start = auto_start;
        self
    }

    pub fn steps_for_page(&self, page: PageId) -> &[Step] {
        self.registry.steps_for_page(page)
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn has_shown(&self, page: PageId) -> bool {
        self.shown_pages.contains(&page)
    }

    pub fn current_step(&self) -> Option<&Step> {
        if !self.running {
            return None;
        }
        self.registry.steps_for_page(self.page).get(self.step_index)
    }

    /// Tries to activate the current page's tour. Deferral, not failure:
    /// a false return means "not now", and the caller retries on the next
    /// relevant state change.
    pub fn attempt_start(&mut self, probe: &dyn ReadinessProbe) -> bool {
        if self.running || self.started_this_visit {
            return false;
        }
        if self.shown_pages.contains(&self.page) {
            return false;
        }
        if self.policy == PersistencePolicy::File && self.seen {
            debug!(page = %self.page, "persisted seen flag suppresses tour");
            return false;
        }

        let steps = self.registry.steps_for_page(self.page);
        if steps.is_empty() {
            return false;
        }
        if self.step_index >= steps.len() {
            self.step_index = 0;
        }

        // A route hop at the current index starts "in transit": no anchor
        // can or needs to resolve for it.
        let in_transit = steps[self.step_index].is_route_hop();
        if !in_transit {
            let ready = steps.iter().all(|step| match &step.target {
                StepTarget::Anchor(raw) => anchor_ready(probe, raw),
                StepTarget::RouteHop(_) | StepTarget::Centered => true,
            });
            if !ready {
                debug!(page = %self.page, "tour start deferred, anchors not ready");
                return false;
            }
        }

        self.running = true;
        self.started_this_visit = true;
        self.shown_pages.insert(self.page);
        self.sync_gate();
        debug!(page = %self.page, step = self.step_index, in_transit, "tour started");
        true
    }

    /// Moves one step in either direction. Backward clamps at the first
    /// step; forward past the last step completes the tour; landing on a
    /// route hop deactivates and emits a navigation request instead.
    pub fn advance(&mut self, direction: AdvanceDirection) -> Option<TourEffect> {
        if !self.running {
            return None;
        }
        // The displayed step is leaving for whatever reason comes next.
        self.gate = None;

        let next = match direction {
            AdvanceDirection::Forward => self.step_index.saturating_add(1),
            AdvanceDirection::Backward => self.step_index.saturating_sub(1),
        };
        if next == self.step_index {
            self.sync_gate();
            return None;
        }

        let decision = {
            let steps = self.registry.steps_for_page(self.page);
            if next >= steps.len() {
                AdvanceDecision::Complete
            } else if let Some(to) = steps[next].hop_destination() {
                AdvanceDecision::Hop(to)
            } else {
                AdvanceDecision::Move
            }
        };

        match decision {
            AdvanceDecision::Complete => {
                self.complete("finished");
                None
            }
            AdvanceDecision::Hop(to) => {
                self.running = false;
                self.step_index = next;
                self.started_this_visit = false;
                self.write_progress();
                debug!(from = %self.page, to = %to, "route hop, requesting navigation");
                Some(TourEffect::Navigate(to))
            }
            AdvanceDecision::Move => {
                self.step_index = next;
                self.write_progress();
                self.sync_gate();
                debug!(page = %self.page, step = self.step_index, "tour advanced");
                None
            }
        }
    }

    pub fn handle_overlay_signal(&mut self, signal: OverlaySignal) -> Option<TourEffect> {
        match signal {
            OverlaySignal::StepAfter { direction } => self.advance(direction),
            OverlaySignal::Finished => {
                if self.running {
                    self.complete("finished");
                }
                None
            }
            OverlaySignal::Skipped => {
                if self.running {
                    self.complete("skipped");
                }
                None
            }
        }
    }

    /// Feeds a widget interaction to the armed advance gate, if any. A
    /// matching event advances forward exactly once; the gate is taken
    /// before advancing so it cannot fire twice.
    pub fn handle_ui_event(&mut self, event: &UiEvent) -> Option<TourEffect> {
        if !self.running {
            return None;
        }
        let matched = self
            .gate
            .as_ref()
            .is_some_and(|gate| gate.matches(event));
        if !matched {
            return None;
        }
        self.gate = None;
        debug!(anchor = %event.anchor, "advance requirement satisfied");
        self.advance(AdvanceDirection::Forward)
    }

    /// Resolves an "in transit" start: when the current step is a route
    /// hop (a page authored to begin with one), deactivate and request the
    /// embedded navigation. No-op otherwise.
    pub fn follow_route_hop(&mut self) -> Option<TourEffect> {
        if !self.running {
            return None;
        }
        let to = self.current_step().and_then(Step::hop_destination)?;
        self.gate = None;
        self.running = false;
        self.started_this_visit = false;
        debug!(from = %self.page, to = %to, "following in-transit route hop");
        Some(TourEffect::Navigate(to))
    }

    /// Forces the current page's tour to run again: the one entry point
    /// besides page-identity changes, exposed for a manual restart control.
    pub fn restart(&mut self, probe: &dyn ReadinessProbe) -> bool {
        self.gate = None;
        self.running = false;
        self.started_this_visit = false;
        self.step_index = 0;
        self.shown_pages.remove(&self.page);
        self.seen = false;
        if let Err(err) = self.store.clear() {
            warn!(error = %err, "failed to clear persisted tour progress");
        }
        debug!(page = %self.page, "tour restart requested");
        self.attempt_start(probe)
    }

    /// Reacts to the navigator reporting a new active page: cancels any
    /// in-flight tour state and re-evaluates a fresh start. `shown_pages`
    /// survives, so a page's tour runs at most once per session.
    pub fn on_page_changed(&mut self, new_page: PageId, probe: &dyn ReadinessProbe) -> bool {
        if new_page == self.page {
            return false;
        }
        self.gate = None;
        self.running = false;
        self.started_this_visit = false;
        debug!(from = %self.page, to = %new_page, "tour reset for page change");
        self.page = new_page;
        self.step_index = 0;

        if !self.auto_start {
            return false;
        }
        self.attempt_start(probe)
    }

    pub fn auto_start(&self) -> bool {
        self.auto_start
    }

    fn complete(&mut self, outcome: &'static str) {
        self.gate = None;
        self.running = false;
        self.step_index = 0;
        self.started_this_visit = false;
        self.seen = true;
        self.write_progress();
        debug!(page = %self.page, outcome, "tour ended");
    }

    fn write_progress(&mut self) {
        let progress = Progress {
            seen: self.seen,
            step: self.step_index,
        };
        if let Err(err) = self.store.save(&progress) {
            warn!(error = %err, "failed to persist tour progress");
        }
    }

    fn sync_gate(&mut self) {
        let requirement = self.current_step().and_then(|step| step.advance.clone());
        self.gate = requirement.map(AdvanceGate::arm);
    }
}

/// A selector that cannot be parsed counts as "element absent", never as
/// an error the caller sees.
fn anchor_ready(probe: &dyn ReadinessProbe, raw: &str) -> bool {
    match AnchorSelector::parse(raw) {
        Ok(anchor) => probe.anchor_present(&anchor),
        Err(err) => {
            debug!(selector = raw, error = %err, "malformed anchor selector, treating as not ready");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::input::{UiEvent, UiEventKind};
    use crate::page::{AnchorSelector, PageId};
    use crate::store::{ProgressStore, SessionStore};
    use crate::tour::progress::{PersistencePolicy, Progress};
    use crate::tour::registry::StepRegistry;
    use crate::tour::step::{Placement, Step};

    use super::{AdvanceDirection, OverlaySignal, ReadinessProbe, Sequencer, TourEffect};

    const PAGE_A: PageId = PageId::new("avatar");
    const PAGE_B: PageId = PageId::new("intake");

    struct FakePage {
        anchors: HashSet<&'static str>,
    }

    impl FakePage {
        fn with(anchors: &[&'static str]) -> Self {
            Self {
                anchors: anchors.iter().copied().collect(),
            }
        }

        fn empty() -> Self {
            Self::with(&[])
        }
    }

    impl ReadinessProbe for FakePage {
        fn anchor_present(&self, anchor: &AnchorSelector) -> bool {
            self.anchors.contains(anchor.as_str())
        }
    }

    fn two_page_registry() -> StepRegistry {
        StepRegistry::new()
            .with_page(
                PAGE_A,
                vec![
                    Step::anchor("avatar-male", "Pick a starting avatar."),
                    Step::anchor("avatar-female", "Or choose this one."),
                    Step::anchor("continue-to-intake", "Continue to intake."),
                    Step::route_hop(PAGE_B, "Heading to intake..."),
                ],
            )
            .with_page(
                PAGE_B,
                vec![
                    Step::anchor("intake-section1", "Basic info."),
                    Step::anchor("intake-section2", "One more field."),
                ],
            )
    }

    fn sequencer(registry: StepRegistry, page: PageId) -> Sequencer {
        Sequencer::new(
            registry,
            PersistencePolicy::Session,
            Box::new(SessionStore::new()),
            page,
        )
    }

    fn page_a_ready() -> FakePage {
        FakePage::with(&["avatar-male", "avatar-female", "continue-to-intake"])
    }

    fn activate(anchor: &str) -> UiEvent {
        UiEvent::activate(AnchorSelector::parse(anchor).expect("anchor should parse"))
    }

    #[test]
    fn unknown_page_never_starts() {
        let mut seq = sequencer(two_page_registry(), PageId::new("billing"));
        assert!(seq.steps_for_page(PageId::new("billing")).is_empty());
        assert!(!seq.attempt_start(&page_a_ready()));
        assert!(!seq.is_running());
    }

    #[test]
    fn attempt_start_defers_until_every_anchor_resolves() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);

        let partial = FakePage::with(&["avatar-male", "avatar-female"]);
        assert!(!seq.attempt_start(&partial));
        assert!(!seq.is_running());

        assert!(seq.attempt_start(&page_a_ready()));
        assert!(seq.is_running());
        assert_eq!(seq.step_index(), 0);
        assert!(seq.has_shown(PAGE_A));
    }

    #[test]
    fn attempt_start_is_idempotent_within_a_visit() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        let probe = page_a_ready();

        assert!(seq.attempt_start(&probe));
        assert!(!seq.attempt_start(&probe));

        // Even after the tour ends, the page stays shown for this session.
        seq.handle_overlay_signal(OverlaySignal::Skipped);
        assert!(!seq.attempt_start(&probe));
    }

    #[test]
    fn malformed_selector_counts_as_not_ready() {
        let registry = StepRegistry::new().with_page(
            PAGE_A,
            vec![Step::anchor("NOT A SELECTOR", "Broken on purpose.")],
        );
        let mut seq = sequencer(registry, PAGE_A);
        assert!(!seq.attempt_start(&page_a_ready()));
        assert!(!seq.is_running());
    }

    #[test]
    fn backward_at_first_step_stays_put() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        assert!(seq.attempt_start(&page_a_ready()));

        assert_eq!(seq.advance(AdvanceDirection::Backward), None);
        assert_eq!(seq.step_index(), 0);
        assert!(seq.is_running());
    }

    #[test]
    fn full_sequence_hands_off_to_the_navigator_and_restarts_on_arrival() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        assert!(seq.attempt_start(&page_a_ready()));

        assert_eq!(seq.advance(AdvanceDirection::Forward), None);
        assert_eq!(seq.step_index(), 1);
        assert_eq!(seq.advance(AdvanceDirection::Forward), None);
        assert_eq!(seq.step_index(), 2);

        let effect = seq.advance(AdvanceDirection::Forward);
        assert_eq!(effect, Some(TourEffect::Navigate(PAGE_B)));
        assert!(!seq.is_running());

        let arrived = seq.on_page_changed(
            PAGE_B,
            &FakePage::with(&["intake-section1", "intake-section2"]),
        );
        assert!(arrived);
        assert!(seq.is_running());
        assert_eq!(seq.page(), PAGE_B);
        assert_eq!(seq.step_index(), 0);
    }

    #[test]
    fn arrival_with_missing_anchors_defers_then_starts() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        assert!(seq.attempt_start(&page_a_ready()));
        seq.advance(AdvanceDirection::Forward);
        seq.advance(AdvanceDirection::Forward);
        assert!(seq.advance(AdvanceDirection::Forward).is_some());

        assert!(!seq.on_page_changed(PAGE_B, &FakePage::with(&["intake-section1"])));
        assert!(!seq.is_running());

        // A later hydration tick re-checks readiness.
        assert!(seq.attempt_start(&FakePage::with(&["intake-section1", "intake-section2"])));
        assert_eq!(seq.step_index(), 0);
    }

    #[test]
    fn forward_past_the_last_step_completes() {
        let mut seq = sequencer(two_page_registry(), PAGE_B);
        let probe = FakePage::with(&["intake-section1", "intake-section2"]);
        assert!(seq.attempt_start(&probe));

        seq.advance(AdvanceDirection::Forward);
        assert_eq!(seq.advance(AdvanceDirection::Forward), None);
        assert!(!seq.is_running());
        assert_eq!(seq.step_index(), 0);
        assert!(seq.has_shown(PAGE_B));
    }

    #[test]
    fn advance_requirement_gates_forward_progress() {
        let registry = StepRegistry::new().with_page(
            PAGE_B,
            vec![
                Step::anchor("submit-intake", "Submit to start the visit.")
                    .placed(Placement::Top)
                    .advance_on(UiEventKind::Activate, "submit-intake"),
                Step::anchor("intake-section1", "Basic info."),
            ],
        );
        let mut seq = sequencer(registry, PAGE_B);
        let probe = FakePage::with(&["submit-intake", "intake-section1"]);
        assert!(seq.attempt_start(&probe));

        // Interactions elsewhere do not advance.
        assert_eq!(seq.handle_ui_event(&activate("intake-section1")), None);
        assert_eq!(seq.step_index(), 0);

        // The matching one advances exactly once.
        assert_eq!(seq.handle_ui_event(&activate("submit-intake")), None);
        assert_eq!(seq.step_index(), 1);

        // The gate detached with the step; replaying the event is inert.
        assert_eq!(seq.handle_ui_event(&activate("submit-intake")), None);
        assert_eq!(seq.step_index(), 1);
    }

    #[test]
    fn manual_advance_disarms_a_pending_gate() {
        let registry = StepRegistry::new().with_page(
            PAGE_B,
            vec![
                Step::anchor("submit-intake", "Submit.")
                    .advance_on(UiEventKind::Activate, "submit-intake"),
                Step::anchor("intake-section1", "Basic info."),
                Step::anchor("intake-section2", "One more field."),
            ],
        );
        let mut seq = sequencer(registry, PAGE_B);
        let probe = FakePage::with(&["submit-intake", "intake-section1", "intake-section2"]);
        assert!(seq.attempt_start(&probe));

        // Skipping the gated step by hand must detach its listener.
        seq.advance(AdvanceDirection::Forward);
        assert_eq!(seq.step_index(), 1);
        assert_eq!(seq.handle_ui_event(&activate("submit-intake")), None);
        assert_eq!(seq.step_index(), 1);
    }

    #[test]
    fn restart_reruns_a_page_already_shown() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        let probe = page_a_ready();
        assert!(seq.attempt_start(&probe));
        seq.handle_overlay_signal(OverlaySignal::Skipped);
        assert!(seq.has_shown(PAGE_A));
        assert!(!seq.attempt_start(&probe));

        assert!(seq.restart(&probe));
        assert!(seq.is_running());
        assert_eq!(seq.step_index(), 0);
    }

    #[test]
    fn restart_is_immediate_even_with_auto_start_disabled() {
        let mut seq = sequencer(two_page_registry(), PAGE_A).with_auto_start(false);
        let probe = page_a_ready();

        assert!(!seq.on_page_changed(PAGE_B, &probe));
        assert!(!seq.on_page_changed(PAGE_A, &probe));
        assert!(!seq.is_running());

        assert!(seq.restart(&probe));
        assert!(seq.is_running());
    }

    #[test]
    fn page_authored_to_begin_with_a_hop_passes_through() {
        let registry = StepRegistry::new()
            .with_page(PAGE_A, vec![Step::route_hop(PAGE_B, "Moving along...")])
            .with_page(PAGE_B, vec![Step::anchor("intake-section1", "Basic info.")]);
        let mut seq = sequencer(registry, PAGE_A);

        // No anchors needed: the tour starts already in transit.
        assert!(seq.attempt_start(&FakePage::empty()));
        assert_eq!(seq.follow_route_hop(), Some(TourEffect::Navigate(PAGE_B)));
        assert!(!seq.is_running());
        assert_eq!(seq.follow_route_hop(), None);
    }

    #[test]
    fn overlay_terminal_signals_end_the_tour() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        assert!(seq.attempt_start(&page_a_ready()));
        seq.advance(AdvanceDirection::Forward);

        seq.handle_overlay_signal(OverlaySignal::Finished);
        assert!(!seq.is_running());
        assert_eq!(seq.step_index(), 0);
    }

    #[test]
    fn persisted_seen_flag_suppresses_auto_start_under_file_policy() {
        let mut store = SessionStore::new();
        store
            .save(&Progress { seen: true, step: 0 })
            .expect("seed save should pass");

        let mut seq = Sequencer::new(
            two_page_registry(),
            PersistencePolicy::File,
            Box::new(store),
            PAGE_A,
        );
        let probe = page_a_ready();
        assert!(!seq.attempt_start(&probe));

        // Restart clears the record and forces re-entry.
        assert!(seq.restart(&probe));
        assert!(seq.is_running());
    }

    #[test]
    fn file_policy_resumes_at_the_persisted_step() {
        let mut store = SessionStore::new();
        store
            .save(&Progress { seen: false, step: 1 })
            .expect("seed save should pass");

        let mut seq = Sequencer::new(
            two_page_registry(),
            PersistencePolicy::File,
            Box::new(store),
            PAGE_A,
        );
        assert!(seq.attempt_start(&page_a_ready()));
        assert_eq!(seq.step_index(), 1);
    }

    #[test]
    fn session_policy_ignores_any_persisted_step() {
        let mut store = SessionStore::new();
        store
            .save(&Progress { seen: false, step: 2 })
            .expect("seed save should pass");

        let seq = Sequencer::new(
            two_page_registry(),
            PersistencePolicy::Session,
            Box::new(store),
            PAGE_A,
        );
        assert_eq!(seq.step_index(), 0);
    }

    #[test]
    fn completion_records_seen_in_the_store() {
        let registry = StepRegistry::new()
            .with_page(PAGE_B, vec![Step::anchor("intake-section1", "Basic info.")]);
        let mut seq = Sequencer::new(
            registry,
            PersistencePolicy::File,
            Box::new(SessionStore::new()),
            PAGE_B,
        );
        assert!(seq.attempt_start(&FakePage::with(&["intake-section1"])));
        seq.handle_overlay_signal(OverlaySignal::Finished);

        let saved = seq
            .store
            .load()
            .expect("load should pass")
            .expect("completion should have been recorded");
        assert!(saved.seen);
        assert_eq!(saved.step, 0);
    }

    #[test]
    fn spurious_same_page_notification_is_inert() {
        let mut seq = sequencer(two_page_registry(), PAGE_A);
        let probe = page_a_ready();
        assert!(seq.attempt_start(&probe));
        seq.advance(AdvanceDirection::Forward);

        assert!(!seq.on_page_changed(PAGE_A, &probe));
        assert!(seq.is_running());
        assert_eq!(seq.step_index(), 1);
    }
}
