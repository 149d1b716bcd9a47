use crate::command::ActionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Tour,
}

#[derive(Debug, Clone, Default)]
pub struct StatusState {
    pub message: String,
    pub last_action_id: Option<ActionId>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    /// Index into the active page's focus-traversal order; clamped at use
    /// because hydration can shrink or grow that order between events.
    pub focus_index: usize,
    pub debug_status_visible: bool,
    pub mode: Mode,
    pub status: StatusState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            focus_index: 0,
            debug_status_visible: false,
            mode: Mode::Browse,
            status: StatusState::default(),
        }
    }
}
