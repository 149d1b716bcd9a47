pub mod screens;
mod selector;
mod site;
mod traits;

pub use selector::AnchorSelector;
pub use site::SiteMap;
pub use traits::{ActivationEffect, PageId, PageSurface};
