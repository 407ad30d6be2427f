use thiserror::Error;

/// Why a piece of text could not become a task
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("invalid time format: {0:?} (expected HH:MM, 00:00-23:59)")]
    InvalidTime(String),

    #[error("no HH:MM time found in {0:?}")]
    MissingTime(String),

    #[error("task has no description: {0:?}")]
    EmptyDescription(String),
}

pub type Result<T> = std::result::Result<T, TaskError>;
