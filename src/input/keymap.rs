use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::Mode;
use crate::command::Command;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeymapPreset {
    Default,
    Emacs,
}

impl KeymapPreset {
    pub fn parse(value: &str) -> Self {
        match value {
            "default" => Self::Default,
            "emacs" => Self::Emacs,
            _ => Self::Default,
        }
    }
}

pub fn map_key_to_command(key: KeyEvent, mode: Mode) -> Option<Command> {
    map_key_to_command_with_preset(key, mode, KeymapPreset::Default)
}

pub fn map_key_to_command_with_preset(
    key: KeyEvent,
    mode: Mode,
    preset: KeymapPreset,
) -> Option<Command> {
    // Tour-only bindings first; everything else falls through so widgets
    // stay reachable while a gated step waits for a real interaction.
    if mode == Mode::Tour
        && let Some(command) = map_tour_mode_key(key)
    {
        return Some(command);
    }

    match preset {
        KeymapPreset::Default => map_browse_key_default(key),
        KeymapPreset::Emacs => map_browse_key_emacs(key),
    }
}

fn map_tour_mode_key(key: KeyEvent) -> Option<Command> {
    if !key.modifiers.difference(KeyModifiers::SHIFT).is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char('n') | KeyCode::Right => Some(Command::TourNext),
        KeyCode::Char('p') | KeyCode::Left => Some(Command::TourBack),
        KeyCode::Char('s') | KeyCode::Esc => Some(Command::TourSkip),
        _ => None,
    }
}

fn map_browse_key_default(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }

    match key.code {
        KeyCode::Tab => Some(Command::FocusNext),
        KeyCode::BackTab => Some(Command::FocusPrev),
        KeyCode::Enter => Some(Command::Activate),
        KeyCode::Char(']') => Some(Command::NextPage),
        KeyCode::Char('[') => Some(Command::PrevPage),
        KeyCode::Char(digit @ '1'..='9') => Some(Command::GotoPage {
            index: digit as usize - '1' as usize,
        }),
        KeyCode::Char('r') => Some(Command::RestartTour),
        KeyCode::Char('d') => Some(Command::DebugStatusToggle),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc => Some(Command::Cancel),
        _ => None,
    }
}

fn map_browse_key_emacs(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('n') => Some(Command::FocusNext),
            KeyCode::Char('p') => Some(Command::FocusPrev),
            KeyCode::Char('v') => Some(Command::NextPage),
            KeyCode::Char('g') => Some(Command::Cancel),
            KeyCode::Char('q') => Some(Command::Quit),
            _ => None,
        };
    }

    if key.modifiers.contains(KeyModifiers::ALT) {
        return match key.code {
            KeyCode::Char('v') => Some(Command::PrevPage),
            KeyCode::Char('r') => Some(Command::RestartTour),
            _ => None,
        };
    }

    match key.code {
        KeyCode::PageDown => Some(Command::NextPage),
        KeyCode::PageUp => Some(Command::PrevPage),
        _ => map_browse_key_default(key),
    }
}
