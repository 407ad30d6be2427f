use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Tasks file {} does not exist", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read tasks file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum MonitorError {
    /// The cancellation token fired while the loop was waiting for its next tick
    #[error("Task monitoring was cancelled")]
    Cancelled,
}
