//! Task module
//!
//! Reminder tasks read from a plain-text file:
//! - `model`: time-of-day and the immutable task record
//! - `parser`: free-form line parsing and input validation
//! - `file`: appending to and creating task files

pub mod error;
pub mod file;
pub mod model;
pub mod parser;

pub use error::TaskError;
pub use file::{
    add_task_to_file, create_file_with_task, try_add_task_to_file, try_create_file_with_task,
};
pub use model::{Task, TimeOfDay};
pub use parser::{parse_line, parse_tasks_from_text, try_validate_task_input, validate_task_input};
