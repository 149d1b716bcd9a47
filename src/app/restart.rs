use tokio::sync::mpsc::UnboundedSender;

use crate::command::Command;
use crate::event::DomainEvent;

/// Cloneable, zero-argument restart capability.
///
/// Any UI control can hold one and request a tour restart without a
/// reference to the sequencer; the request travels the same event channel
/// as every other command.
#[derive(Clone)]
pub struct RestartHandle {
    tx: UnboundedSender<DomainEvent>,
}

impl RestartHandle {
    pub(crate) fn new(tx: UnboundedSender<DomainEvent>) -> Self {
        Self { tx }
    }

    /// Enqueues a restart of the current page's tour. Safe to call from
    /// anywhere; a closed channel means the app is already shutting down.
    pub fn restart(&self) {
        let _ = self.tx.send(DomainEvent::Command(Command::RestartTour));
    }
}
