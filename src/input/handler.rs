use crossterm::event::{Event, KeyEventKind};

use crate::app::App;
use crate::command::Command;
use crate::error::AppResult;

use super::keymap::{KeymapPreset, map_key_to_command_with_preset};

pub(crate) struct InputEventOutcome {
    pub(crate) quit_requested: bool,
    pub(crate) command: Option<Command>,
}

impl App {
    pub(crate) fn handle_input_event(
        &mut self,
        event: Event,
        needs_redraw: &mut bool,
    ) -> AppResult<InputEventOutcome> {
        match event {
            Event::Key(key) if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) => {
                let preset = KeymapPreset::parse(&self.config.keymap.preset);
                let command = map_key_to_command_with_preset(key, self.state.mode, preset);

                let Some(command) = command else {
                    return Ok(InputEventOutcome {
                        quit_requested: false,
                        command: None,
                    });
                };
                if matches!(command, Command::Quit) {
                    return Ok(InputEventOutcome {
                        quit_requested: true,
                        command: None,
                    });
                }
                Ok(InputEventOutcome {
                    quit_requested: false,
                    command: Some(command),
                })
            }
            Event::Resize(_, _) => {
                *needs_redraw = true;
                Ok(InputEventOutcome {
                    quit_requested: false,
                    command: None,
                })
            }
            _ => Ok(InputEventOutcome {
                quit_requested: false,
                command: None,
            }),
        }
    }
}
