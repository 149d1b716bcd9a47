use crate::page::AnchorSelector;

/// Interaction event kinds a widget can emit. Advance requirements bind to
/// these the way the web original bound to DOM event names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEventKind {
    /// The widget was activated (Enter on a focused widget).
    Activate,
    /// The widget gained focus.
    Focus,
}

impl UiEventKind {
    pub fn id(self) -> &'static str {
        match self {
            Self::Activate => "activate",
            Self::Focus => "focus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "activate" => Some(Self::Activate),
            "focus" => Some(Self::Focus),
            _ => None,
        }
    }
}

/// A widget interaction, reported to the tour's advance gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent {
    pub kind: UiEventKind,
    pub anchor: AnchorSelector,
}

impl UiEvent {
    pub fn activate(anchor: AnchorSelector) -> Self {
        Self {
            kind: UiEventKind::Activate,
            anchor,
        }
    }

    pub fn focus(anchor: AnchorSelector) -> Self {
        Self {
            kind: UiEventKind::Focus,
            anchor,
        }
    }
}
