mod core;
mod event_loop;
mod restart;
mod state;
pub(crate) mod terminal_session;
mod view_ops;

#[cfg(test)]
mod tests;

pub use core::App;
pub use restart::RestartHandle;
pub use state::{AppState, Mode, StatusState};
