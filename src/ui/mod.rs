mod chrome;
mod layout;
mod overlay;

pub use chrome::draw_chrome;
pub use layout::{UiLayout, split_layout};
pub use overlay::{TourOverlayView, draw_tour_overlay};
