mod avatar;
mod chart;
mod intake;

use crate::page::{PageId, PageSurface};

pub use avatar::AvatarScreen;
pub use chart::ChartScreen;
pub use intake::IntakeScreen;

pub const AVATAR: PageId = PageId::new("avatar");
pub const INTAKE: PageId = PageId::new("intake");
pub const CHART: PageId = PageId::new("chart");

/// The demo flow in visit order: avatar selection, intake form, chart.
pub fn demo_pages() -> Vec<Box<dyn PageSurface>> {
    vec![
        Box::new(AvatarScreen::new()),
        Box::new(IntakeScreen::new()),
        Box::new(ChartScreen::new()),
    ]
}
