use std::fmt;

use ratatui::Frame;
use ratatui::layout::Rect;

use super::selector::AnchorSelector;

/// Logical route identity used to select which step sequence applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(&'static str);

impl PageId {
    pub const fn new(id: &'static str) -> Self {
        Self(id)
    }

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// What activating a widget asks the host to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationEffect {
    None,
    Navigate(PageId),
    RestartTour,
}

/// One renderable page of the application.
///
/// Pages own their widgets and mount them progressively: an anchor only
/// answers `anchor_present` once its widget has hydrated, so callers must
/// treat absence as "not yet", not "never".
pub trait PageSurface {
    fn id(&self) -> PageId;

    fn title(&self) -> &'static str;

    /// Whether the widget behind `anchor` is currently mounted.
    fn anchor_present(&self, anchor: &AnchorSelector) -> bool;

    /// Screen rectangle of a mounted anchor within `area`.
    fn anchor_rect(&self, anchor: &AnchorSelector, area: Rect) -> Option<Rect>;

    /// Advances hydration by one stage. Returns true when new anchors mounted.
    fn on_tick(&mut self) -> bool;

    /// Mounted anchors in focus-traversal order.
    fn focusable(&self) -> Vec<AnchorSelector>;

    fn activate(&mut self, anchor: &AnchorSelector) -> ActivationEffect;

    fn draw(&self, frame: &mut Frame<'_>, area: Rect, focus: Option<&AnchorSelector>);
}
