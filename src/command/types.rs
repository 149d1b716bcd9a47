#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    FocusNext,
    FocusPrev,
    Activate,
    NextPage,
    PrevPage,
    GotoPage { index: usize },
    TourNext,
    TourBack,
    TourSkip,
    RestartTour,
    DebugStatusToggle,
    Cancel,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionId {
    FocusNext,
    FocusPrev,
    Activate,
    NextPage,
    PrevPage,
    GotoPage,
    TourNext,
    TourBack,
    TourSkip,
    RestartTour,
    TourStart,
    TourEnd,
    DebugStatusToggle,
    Cancel,
    Quit,
    Input,
    Hydration,
}

impl ActionId {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FocusNext => "focus-next",
            Self::FocusPrev => "focus-prev",
            Self::Activate => "activate",
            Self::NextPage => "next-page",
            Self::PrevPage => "prev-page",
            Self::GotoPage => "goto-page",
            Self::TourNext => "tour-next",
            Self::TourBack => "tour-back",
            Self::TourSkip => "tour-skip",
            Self::RestartTour => "restart-tour",
            Self::TourStart => "tour-start",
            Self::TourEnd => "tour-end",
            Self::DebugStatusToggle => "debug-status-toggle",
            Self::Cancel => "cancel",
            Self::Quit => "quit",
            Self::Input => "input",
            Self::Hydration => "hydration",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Applied,
    Noop,
    QuitRequested,
}

impl Command {
    pub fn action_id(&self) -> ActionId {
        match self {
            Self::FocusNext => ActionId::FocusNext,
            Self::FocusPrev => ActionId::FocusPrev,
            Self::Activate => ActionId::Activate,
            Self::NextPage => ActionId::NextPage,
            Self::PrevPage => ActionId::PrevPage,
            Self::GotoPage { .. } => ActionId::GotoPage,
            Self::TourNext => ActionId::TourNext,
            Self::TourBack => ActionId::TourBack,
            Self::TourSkip => ActionId::TourSkip,
            Self::RestartTour => ActionId::RestartTour,
            Self::DebugStatusToggle => ActionId::DebugStatusToggle,
            Self::Cancel => ActionId::Cancel,
            Self::Quit => ActionId::Quit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ActionId, Command};

    #[test]
    fn command_action_id_maps_tour_and_focus_variants() {
        assert_eq!(Command::TourNext.action_id(), ActionId::TourNext);
        assert_eq!(Command::RestartTour.action_id(), ActionId::RestartTour);
        assert_eq!(
            Command::GotoPage { index: 2 }.action_id(),
            ActionId::GotoPage
        );
        assert_eq!(Command::Activate.action_id(), ActionId::Activate);
        assert_eq!(ActionId::TourSkip.as_str(), "tour-skip");
    }
}
