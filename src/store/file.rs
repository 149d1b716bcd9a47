use std::fs;
use std::io;
use std::path::PathBuf;

use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::tour::Progress;

use super::ProgressStore;

/// On-disk store: one JSON record at a fixed path.
///
/// Writes go through a sibling temp file and a rename so a crash mid-write
/// never leaves a half-written record. A record that fails to parse is
/// treated as absent rather than surfaced; the next save replaces it.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl ProgressStore for JsonFileStore {
    fn load(&mut self) -> AppResult<Option<Progress>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => {
                return Err(AppError::io_with_context(
                    err,
                    format!("failed to read progress: {}", self.path.display()),
                ));
            }
        };

        match serde_json::from_str::<Progress>(&raw) {
            Ok(progress) => Ok(Some(progress)),
            Err(err) => {
                warn!(
                    path = %self.path.display(),
                    error = %err,
                    "progress record is corrupt, treating as absent"
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, progress: &Progress) -> AppResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|err| {
                AppError::io_with_context(
                    err,
                    format!("failed to create state dir: {}", parent.display()),
                )
            })?;
        }

        let raw = serde_json::to_vec(progress)
            .map_err(|err| AppError::store("serialize progress record", err))?;
        let temp = self.temp_path();
        fs::write(&temp, raw).map_err(|err| {
            AppError::io_with_context(err, format!("failed to write progress: {}", temp.display()))
        })?;
        fs::rename(&temp, &self.path).map_err(|err| {
            AppError::io_with_context(
                err,
                format!("failed to replace progress: {}", self.path.display()),
            )
        })
    }

    fn clear(&mut self) -> AppResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(AppError::io_with_context(
                err,
                format!("failed to clear progress: {}", self.path.display()),
            )),
        }
    }
}
