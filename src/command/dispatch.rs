use crate::app::{AppState, Mode};
use crate::error::AppResult;
use crate::event::{AppEvent, NavReason};
use crate::input::UiEvent;
use crate::page::{ActivationEffect, SiteMap};
use crate::tour::{AdvanceDirection, OverlaySignal, Sequencer, TourEffect};

use super::core::{focus_next, focus_prev, focused_anchor, goto_page, next_page, prev_page};
use super::types::{ActionId, Command, CommandOutcome};

#[derive(Debug, Clone)]
pub struct CommandDispatchResult {
    pub outcome: CommandOutcome,
    pub emitted_events: Vec<AppEvent>,
}

/// Applies one command to the app. Page and mode transitions are reported
/// as events rather than acted on here; the owner reacts to them after the
/// dispatch returns.
pub fn dispatch(
    state: &mut AppState,
    command: Command,
    site: &mut SiteMap,
    tour: &mut Sequencer,
) -> AppResult<CommandDispatchResult> {
    let prev_page_id = site.current_id();
    let prev_mode = state.mode;
    let action_id = command.action_id();
    let reason = nav_reason_for(&command);

    let outcome = match command {
        Command::FocusNext => {
            let outcome = focus_next(state, site);
            notify_focus(state, site, tour);
            outcome
        }
        Command::FocusPrev => {
            let outcome = focus_prev(state, site);
            notify_focus(state, site, tour);
            outcome
        }
        Command::Activate => activate_focused(state, site, tour),
        Command::NextPage => next_page(state, site),
        Command::PrevPage => prev_page(state, site),
        Command::GotoPage { index } => goto_page(state, site, index),
        Command::TourNext => {
            overlay_signal(
                state,
                site,
                tour,
                OverlaySignal::StepAfter {
                    direction: AdvanceDirection::Forward,
                },
                ActionId::TourNext,
            )
        }
        Command::TourBack => {
            overlay_signal(
                state,
                site,
                tour,
                OverlaySignal::StepAfter {
                    direction: AdvanceDirection::Backward,
                },
                ActionId::TourBack,
            )
        }
        Command::TourSkip => {
            overlay_signal(state, site, tour, OverlaySignal::Skipped, ActionId::TourSkip)
        }
        Command::RestartTour => {
            let started = tour.restart(&*site);
            state.status.last_action_id = Some(ActionId::RestartTour);
            state.status.message = if started {
                "tour restarted".to_string()
            } else {
                "tour restart pending readiness".to_string()
            };
            CommandOutcome::Applied
        }
        Command::DebugStatusToggle => {
            state.debug_status_visible = !state.debug_status_visible;
            state.status.last_action_id = Some(ActionId::DebugStatusToggle);
            state.status.message = if state.debug_status_visible {
                "debug status shown".to_string()
            } else {
                "debug status hidden".to_string()
            };
            CommandOutcome::Applied
        }
        Command::Cancel => {
            state.status.last_action_id = Some(ActionId::Cancel);
            state.status.message.clear();
            CommandOutcome::Applied
        }
        Command::Quit => {
            state.status.last_action_id = Some(ActionId::Quit);
            state.status.message = "quit requested".to_string();
            CommandOutcome::QuitRequested
        }
    };

    state.mode = if tour.is_running() {
        Mode::Tour
    } else {
        Mode::Browse
    };

    let mut emitted_events = vec![AppEvent::CommandExecuted {
        id: action_id,
        outcome,
    }];
    let current_page_id = site.current_id();
    if current_page_id != prev_page_id {
        emitted_events.push(AppEvent::PageChanged {
            from: prev_page_id,
            to: current_page_id,
            reason,
        });
    }
    if state.mode != prev_mode {
        emitted_events.push(AppEvent::ModeChanged {
            from: prev_mode,
            to: state.mode,
        });
    }

    Ok(CommandDispatchResult {
        outcome,
        emitted_events,
    })
}

fn nav_reason_for(command: &Command) -> NavReason {
    match command {
        Command::NextPage | Command::PrevPage => NavReason::Step,
        Command::GotoPage { .. } => NavReason::Goto,
        Command::Activate => NavReason::Activation,
        _ => NavReason::Tour,
    }
}

/// Reports a focus move to the tour gate; a requirement bound to a focus
/// event can advance the tour, which in turn may navigate.
fn notify_focus(state: &mut AppState, site: &mut SiteMap, tour: &mut Sequencer) {
    let Some(anchor) = focused_anchor(state, site) else {
        return;
    };
    let effect = tour.handle_ui_event(&UiEvent::focus(anchor));
    apply_tour_effect(site, effect);
}

fn activate_focused(
    state: &mut AppState,
    site: &mut SiteMap,
    tour: &mut Sequencer,
) -> CommandOutcome {
    state.status.last_action_id = Some(ActionId::Activate);
    let Some(anchor) = focused_anchor(state, site) else {
        state.status.message = "nothing focused to activate".to_string();
        return CommandOutcome::Noop;
    };

    let page_effect = site.current_mut().activate(&anchor);
    let tour_effect = tour.handle_ui_event(&UiEvent::activate(anchor.clone()));

    // The tour's navigation wins when both want to move; the page's own
    // destination is the same one in every sane registry, so the second
    // goto collapses into a no-op.
    apply_tour_effect(site, tour_effect);
    match page_effect {
        ActivationEffect::Navigate(to) => {
            site.goto(to);
        }
        ActivationEffect::RestartTour => {
            tour.restart(&*site);
        }
        ActivationEffect::None => {}
    }

    state.status.message = format!("activated {anchor}");
    CommandOutcome::Applied
}

fn overlay_signal(
    state: &mut AppState,
    site: &mut SiteMap,
    tour: &mut Sequencer,
    signal: OverlaySignal,
    id: ActionId,
) -> CommandOutcome {
    state.status.last_action_id = Some(id);
    if !tour.is_running() {
        state.status.message = "no tour is running".to_string();
        return CommandOutcome::Noop;
    }

    let effect = tour.handle_overlay_signal(signal);
    apply_tour_effect(site, effect);
    state.status.message = match signal {
        OverlaySignal::StepAfter { .. } if tour.is_running() => {
            format!("tour step {}", tour.step_index() + 1)
        }
        OverlaySignal::Skipped => "tour skipped".to_string(),
        _ => "tour closed".to_string(),
    };
    CommandOutcome::Applied
}

fn apply_tour_effect(site: &mut SiteMap, effect: Option<TourEffect>) {
    if let Some(TourEffect::Navigate(to)) = effect {
        site.goto(to);
    }
}

#[cfg(test)]
mod tests {
    use crate::app::{AppState, Mode};
    use crate::event::{AppEvent, NavReason};
    use crate::page::SiteMap;
    use crate::page::screens::{AVATAR, INTAKE};
    use crate::store::SessionStore;
    use crate::tour::{PersistencePolicy, Sequencer, demo_registry};

    use super::{Command, CommandOutcome, dispatch};

    fn fixture() -> (AppState, SiteMap, Sequencer) {
        let site = SiteMap::demo();
        let tour = Sequencer::new(
            demo_registry(),
            PersistencePolicy::Session,
            Box::new(SessionStore::new()),
            site.current_id(),
        );
        (AppState::default(), site, tour)
    }

    #[test]
    fn activating_the_continue_button_navigates_and_reports_the_change() {
        let (mut state, mut site, mut tour) = fixture();
        // Focus the third widget: continue-to-intake.
        state.focus_index = 2;

        let result = dispatch(&mut state, Command::Activate, &mut site, &mut tour)
            .expect("dispatch should pass");

        assert_eq!(result.outcome, CommandOutcome::Applied);
        assert_eq!(site.current_id(), INTAKE);
        assert!(result.emitted_events.iter().any(|event| matches!(
            event,
            AppEvent::PageChanged {
                from,
                to,
                reason: NavReason::Activation,
            } if *from == AVATAR && *to == INTAKE
        )));
    }

    #[test]
    fn tour_commands_are_noops_while_no_tour_runs() {
        let (mut state, mut site, mut tour) = fixture();
        for command in [Command::TourNext, Command::TourBack, Command::TourSkip] {
            let result = dispatch(&mut state, command, &mut site, &mut tour)
                .expect("dispatch should pass");
            assert_eq!(result.outcome, CommandOutcome::Noop);
        }
    }

    #[test]
    fn tour_advance_through_the_hop_navigates_and_switches_mode() {
        let (mut state, mut site, mut tour) = fixture();
        assert!(tour.attempt_start(&site));
        state.mode = Mode::Tour;

        for _ in 0..2 {
            let result = dispatch(&mut state, Command::TourNext, &mut site, &mut tour)
                .expect("dispatch should pass");
            assert_eq!(result.outcome, CommandOutcome::Applied);
            assert_eq!(site.current_id(), AVATAR);
        }

        let result = dispatch(&mut state, Command::TourNext, &mut site, &mut tour)
            .expect("dispatch should pass");
        assert_eq!(site.current_id(), INTAKE);
        assert!(!tour.is_running());
        assert_eq!(state.mode, Mode::Browse);
        assert!(result.emitted_events.iter().any(|event| matches!(
            event,
            AppEvent::PageChanged { reason: NavReason::Tour, .. }
        )));
        assert!(result.emitted_events.iter().any(|event| matches!(
            event,
            AppEvent::ModeChanged { from: Mode::Tour, to: Mode::Browse }
        )));
    }

    #[test]
    fn quit_requests_loop_exit() {
        let (mut state, mut site, mut tour) = fixture();
        let result = dispatch(&mut state, Command::Quit, &mut site, &mut tour)
            .expect("dispatch should pass");
        assert_eq!(result.outcome, CommandOutcome::QuitRequested);
    }
}
