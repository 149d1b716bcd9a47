use std::time::Duration;

use crossterm::event::EventStream;
use futures_util::StreamExt;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

use crate::command::{ActionId, CommandOutcome};
use crate::error::{AppError, AppResult};
use crate::event::DomainEvent;

use super::core::App;
use super::terminal_session::TerminalSession;

struct LoopRuntime {
    session: TerminalSession,
    hydration_tick: time::Interval,
    input_task: JoinHandle<()>,
    needs_redraw: bool,
}

enum WaitEvent {
    Event(DomainEvent),
    Closed,
}

enum LoopControl {
    Continue,
    Break,
}

impl App {
    pub async fn run(&mut self) -> AppResult<()> {
        let mut loop_event_rx = self
            .loop_event_rx
            .take()
            .ok_or_else(|| AppError::invalid_argument("event loop already consumed"))?;
        let mut runtime = self.initialize_loop_runtime()?;

        // First readiness evaluation happens before any event arrives, so
        // pages whose anchors are present from the start tour immediately.
        self.sync_tour();

        loop {
            if runtime.needs_redraw {
                self.render_frame(&mut runtime.session)?;
                runtime.needs_redraw = false;
            }

            let waited = wait_next_event(&mut loop_event_rx, &mut runtime.hydration_tick).await;
            if matches!(
                self.handle_waited_event(waited, &mut runtime)?,
                LoopControl::Break
            ) {
                break;
            }
        }

        runtime.input_task.abort();
        runtime.session.restore()?;
        Ok(())
    }

    fn initialize_loop_runtime(&mut self) -> AppResult<LoopRuntime> {
        let session = TerminalSession::enter()?;
        let mut hydration_tick =
            time::interval(Duration::from_millis(self.config.ui.hydration_interval_ms));
        hydration_tick.set_missed_tick_behavior(MissedTickBehavior::Skip);
        let input_task = spawn_input_task(self.loop_event_tx.clone());

        Ok(LoopRuntime {
            session,
            hydration_tick,
            input_task,
            needs_redraw: true,
        })
    }

    fn handle_waited_event(
        &mut self,
        waited: WaitEvent,
        runtime: &mut LoopRuntime,
    ) -> AppResult<LoopControl> {
        match waited {
            WaitEvent::Event(DomainEvent::Input(event)) => {
                let outcome = self.handle_input_event(event, &mut runtime.needs_redraw)?;
                if outcome.quit_requested {
                    return Ok(LoopControl::Break);
                }
                if let Some(command) = outcome.command {
                    let _ = self.loop_event_tx.send(DomainEvent::Command(command));
                }
            }
            WaitEvent::Event(DomainEvent::InputError(message)) => {
                self.state.status.last_action_id = Some(ActionId::Input);
                self.state.status.message = format!("input error: {message}");
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::Command(command)) => {
                let dispatched = self.dispatch_command(command)?;
                if matches!(dispatched.outcome, CommandOutcome::QuitRequested) {
                    return Ok(LoopControl::Break);
                }
                // Transition events feed the tour before maintenance runs,
                // so a page change is observed before readiness re-checks.
                for event in &dispatched.emitted_events {
                    self.handle_app_event(event);
                }
                self.sync_tour();
                runtime.needs_redraw = true;
            }
            WaitEvent::Event(DomainEvent::HydrationTick) => {
                let hydrated = self.site.tick();
                let tour_changed = self.sync_tour();
                if hydrated || tour_changed {
                    runtime.needs_redraw = true;
                }
            }
            WaitEvent::Closed => return Ok(LoopControl::Break),
        }
        Ok(LoopControl::Continue)
    }
}

async fn wait_next_event(
    loop_event_rx: &mut UnboundedReceiver<DomainEvent>,
    hydration_tick: &mut time::Interval,
) -> WaitEvent {
    tokio::select! {
        biased;
        maybe_event = loop_event_rx.recv() => {
            match maybe_event {
                Some(event) => WaitEvent::Event(event),
                None => WaitEvent::Closed,
            }
        },
        _ = hydration_tick.tick() => {
            WaitEvent::Event(DomainEvent::HydrationTick)
        },
    }
}

fn spawn_input_task(tx: UnboundedSender<DomainEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut input_stream = EventStream::new();
        while let Some(event) = input_stream.next().await {
            let domain_event = match event {
                Ok(event) => DomainEvent::Input(event),
                Err(err) => DomainEvent::InputError(err.to_string()),
            };
            if tx.send(domain_event).is_err() {
                return;
            }
        }
    })
}
