use crate::error::AppResult;
use crate::tour::Progress;

use super::ProgressStore;

/// Session-duration store: progress lives only as long as the process.
#[derive(Debug, Default)]
pub struct SessionStore {
    progress: Option<Progress>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProgressStore for SessionStore {
    fn load(&mut self) -> AppResult<Option<Progress>> {
        Ok(self.progress)
    }

    fn save(&mut self, progress: &Progress) -> AppResult<()> {
        self.progress = Some(*progress);
        Ok(())
    }

    fn clear(&mut self) -> AppResult<()> {
        self.progress = None;
        Ok(())
    }
}
