//! tick-reminder library - plain-text task file, polled reminders
//!
//! Tasks live one per line in a text file (`HH:MM - description`). The
//! [`TaskManager`] reloads the file when it changes and fires a notification
//! once each task's time arrives.

pub mod cli;
pub mod config;
pub mod logging;
pub mod notification;
pub mod schedule;
pub mod sound;
pub mod task;

pub use notification::{ConsoleNotifier, Notifier};
pub use schedule::{
    LoadError, LoadOutcome, MonitorError, MonitorSettings, MonitorState, TaskManager,
};
pub use task::{
    add_task_to_file, create_file_with_task, parse_tasks_from_text, validate_task_input, Task,
    TaskError, TimeOfDay,
};
