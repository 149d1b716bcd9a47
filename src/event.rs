use crossterm::event::Event;

use crate::app::Mode;
use crate::command::{ActionId, Command, CommandOutcome};
use crate::page::PageId;

/// Describes *why* a page navigation occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavReason {
    /// Incremental movement (next-page, prev-page).
    Step,
    /// Direct jump to a page by index.
    Goto,
    /// A widget activation navigated (continue/submit controls).
    Activation,
    /// The tour sequencer followed a route hop.
    Tour,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    CommandExecuted {
        id: ActionId,
        outcome: CommandOutcome,
    },
    PageChanged {
        from: PageId,
        to: PageId,
        reason: NavReason,
    },
    ModeChanged {
        from: Mode,
        to: Mode,
    },
}

#[derive(Debug)]
pub(crate) enum DomainEvent {
    Input(Event),
    InputError(String),
    Command(Command),
    HydrationTick,
}
