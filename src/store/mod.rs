mod file;
mod memory;

use crate::error::AppResult;
use crate::tour::Progress;

pub use file::JsonFileStore;
pub use memory::SessionStore;

/// Key-value persistence for the tour's progress record.
///
/// Implementations must degrade, not fail hard: a corrupt or missing record
/// loads as `None`, and callers treat write errors as log-and-continue.
pub trait ProgressStore: Send {
    fn load(&mut self) -> AppResult<Option<Progress>>;

    fn save(&mut self, progress: &Progress) -> AppResult<()>;

    fn clear(&mut self) -> AppResult<()>;
}
