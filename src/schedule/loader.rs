//! Change-aware tasks file loader

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::error::LoadError;
use crate::task::{parse_tasks_from_text, Task};

/// What a load attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Modification time is not newer than the watermark; nothing was read
    Unchanged,
    /// The file is empty or whitespace-only
    Cleared,
    /// The file was re-parsed; replaces the pending set wholesale
    Loaded(Vec<Task>),
}

/// Reads the tasks file only when its modification time moves past the
/// last one seen.
#[derive(Debug, Clone)]
pub struct TaskLoader {
    path: PathBuf,
    watermark: Option<SystemTime>,
}

impl TaskLoader {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            watermark: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Modification time of the last successful read
    pub fn watermark(&self) -> Option<SystemTime> {
        self.watermark
    }

    /// Re-read the file if it changed since the last successful read.
    ///
    /// The watermark only advances once the content has been read, so a
    /// failed read is retried on the next call.
    pub fn load(&mut self) -> Result<LoadOutcome, LoadError> {
        let metadata = match fs::metadata(&self.path) {
            Ok(m) => m,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(self.path.clone()));
            }
            Err(e) => return Err(self.io_error(e)),
        };
        let modified = metadata.modified().map_err(|e| self.io_error(e))?;

        if self.watermark.is_some_and(|seen| modified <= seen) {
            return Ok(LoadOutcome::Unchanged);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        self.watermark = Some(modified);

        if content.trim().is_empty() {
            tracing::warn!(path = %self.path.display(), "Tasks file is empty");
            return Ok(LoadOutcome::Cleared);
        }

        Ok(LoadOutcome::Loaded(parse_tasks_from_text(&content)))
    }

    fn io_error(&self, source: io::Error) -> LoadError {
        LoadError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
