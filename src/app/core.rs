use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};
use tracing::{trace, warn};

use crate::command::{ActionId, Command, CommandDispatchResult, dispatch};
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::event::{AppEvent, DomainEvent, NavReason};
use crate::page::SiteMap;
use crate::store::{JsonFileStore, ProgressStore, SessionStore};
use crate::tour::{PersistencePolicy, Sequencer, StepRegistry, TourEffect, demo_registry};

use super::restart::RestartHandle;
use super::state::{AppState, Mode};

pub struct App {
    pub state: AppState,
    pub site: SiteMap,
    pub tour: Sequencer,
    pub config: Config,
    pub(super) loop_event_tx: UnboundedSender<DomainEvent>,
    pub(super) loop_event_rx: Option<UnboundedReceiver<DomainEvent>>,
}

impl App {
    /// Demo app: the three-screen visit flow with its bundled walkthrough.
    pub fn new(config: Config) -> AppResult<Self> {
        let site = SiteMap::demo();
        Self::with_parts(config, site, demo_registry())
    }

    pub fn with_parts(config: Config, site: SiteMap, registry: StepRegistry) -> AppResult<Self> {
        let policy = PersistencePolicy::parse(&config.tour.persistence);
        let store = build_store(&config, policy);
        let tour = Sequencer::new(registry, policy, store, site.current_id())
            .with_auto_start(config.tour.auto_start);
        let (loop_event_tx, loop_event_rx) = unbounded_channel();

        Ok(Self {
            state: AppState::default(),
            site,
            tour,
            config,
            loop_event_tx,
            loop_event_rx: Some(loop_event_rx),
        })
    }

    /// Jump to a page by its identity before the loop starts.
    pub fn goto_start_page(&mut self, name: &str) -> AppResult<()> {
        let page = self.site.find(name).ok_or_else(|| {
            AppError::invalid_argument(format!("unknown start screen: {name}"))
        })?;
        if let Some((from, to)) = self.site.goto(page) {
            self.handle_app_event(&AppEvent::PageChanged {
                from,
                to,
                reason: NavReason::Goto,
            });
        }
        Ok(())
    }

    pub fn restart_handle(&self) -> RestartHandle {
        RestartHandle::new(self.loop_event_tx.clone())
    }

    pub(crate) fn dispatch_command(&mut self, command: Command) -> AppResult<CommandDispatchResult> {
        dispatch(&mut self.state, command, &mut self.site, &mut self.tour)
    }

    pub(crate) fn handle_app_event(&mut self, event: &AppEvent) {
        match event {
            AppEvent::PageChanged { to, .. } => {
                self.state.focus_index = 0;
                if self.tour.on_page_changed(*to, &self.site) {
                    self.state.status.last_action_id = Some(ActionId::TourStart);
                    self.state.status.message = format!("tour started on {to}");
                }
                self.sync_mode();
            }
            AppEvent::CommandExecuted { id, outcome } => {
                trace!(command = id.as_str(), ?outcome, "command executed");
            }
            AppEvent::ModeChanged { .. } => {}
        }
    }

    /// Post-event tour maintenance: retries deferred starts and resolves
    /// in-transit route hops, chaining through pass-through pages.
    pub(crate) fn sync_tour(&mut self) -> bool {
        let mut changed = false;

        if self.tour.auto_start()
            && !self.tour.is_running()
            && self.tour.attempt_start(&self.site)
        {
            changed = true;
            self.state.status.last_action_id = Some(ActionId::TourStart);
            self.state.status.message = format!("tour started on {}", self.site.current_id());
        }

        let mut hops = 0;
        while let Some(TourEffect::Navigate(to)) = self.tour.follow_route_hop() {
            changed = true;
            hops += 1;
            if hops > self.site.page_count() {
                warn!("route hop chain exceeded the page count, stopping");
                break;
            }
            if let Some((from, to)) = self.site.goto(to) {
                self.handle_app_event(&AppEvent::PageChanged {
                    from,
                    to,
                    reason: NavReason::Tour,
                });
            }
        }

        self.sync_mode();
        changed
    }

    pub(super) fn sync_mode(&mut self) {
        self.state.mode = if self.tour.is_running() {
            Mode::Tour
        } else {
            Mode::Browse
        };
    }
}

fn build_store(config: &Config, policy: PersistencePolicy) -> Box<dyn ProgressStore> {
    if policy == PersistencePolicy::File {
        match config.progress_path() {
            Some(path) => return Box::new(JsonFileStore::new(path)),
            None => {
                warn!("no writable state location found, falling back to session persistence");
            }
        }
    }
    Box::new(SessionStore::new())
}
