mod events;
mod handler;
pub mod keymap;

pub use events::{UiEvent, UiEventKind};
