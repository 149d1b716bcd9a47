use crate::input::UiEventKind;
use crate::page::PageId;

/// Where a step points.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepTarget {
    /// A concrete widget, referenced by its raw anchor selector. The string
    /// is validated at probe time, not at definition time.
    Anchor(String),
    /// Navigation marker: the sequencer hands control to the navigator
    /// instead of highlighting anything.
    RouteHop(PageId),
    /// Untargeted step shown centered over the page.
    Centered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Placement {
    Top,
    Bottom,
    Left,
    Right,
    #[default]
    Auto,
    Center,
}

impl Placement {
    pub fn id(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
            Self::Auto => "auto",
            Self::Center => "center",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "top" => Some(Self::Top),
            "bottom" => Some(Self::Bottom),
            "left" => Some(Self::Left),
            "right" => Some(Self::Right),
            "auto" => Some(Self::Auto),
            "center" => Some(Self::Center),
            _ => None,
        }
    }
}

/// Condition gating forward progress on a real user action instead of the
/// overlay's next control: an event kind plus the anchor it must fire on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceRequirement {
    pub event: UiEventKind,
    pub anchor: String,
}

/// One instruction in a tour. Immutable once defined; declared per page as
/// an ordered sequence, and that order is the only valid advancement order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub target: StepTarget,
    pub content: String,
    pub placement: Placement,
    pub advance: Option<AdvanceRequirement>,
}

impl Step {
    pub fn anchor(selector: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            target: StepTarget::Anchor(selector.into()),
            content: content.into(),
            placement: Placement::Auto,
            advance: None,
        }
    }

    pub fn route_hop(to: PageId, content: impl Into<String>) -> Self {
        Self {
            target: StepTarget::RouteHop(to),
            content: content.into(),
            placement: Placement::Auto,
            advance: None,
        }
    }

    pub fn centered(content: impl Into<String>) -> Self {
        Self {
            target: StepTarget::Centered,
            content: content.into(),
            placement: Placement::Center,
            advance: None,
        }
    }

    pub fn placed(mut self, placement: Placement) -> Self {
        self.placement = placement;
        self
    }

    pub fn advance_on(mut self, event: UiEventKind, anchor: impl Into<String>) -> Self {
        self.advance = Some(AdvanceRequirement {
            event,
            anchor: anchor.into(),
        });
        self
    }

    pub fn is_route_hop(&self) -> bool {
        matches!(self.target, StepTarget::RouteHop(_))
    }

    /// Destination page when this step is a route hop.
    pub fn hop_destination(&self) -> Option<PageId> {
        match self.target {
            StepTarget::RouteHop(to) => Some(to),
            _ => None,
        }
    }
}
