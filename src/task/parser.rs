//! Free-form task text parser
//!
//! One task per line. The first `H:MM`/`HH:MM` token anywhere in the line is
//! the time; what is left, stripped of surrounding spaces and hyphens, is the
//! description. Blank lines and `#` comments are ignored.

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, error, warn};

use super::error::{Result, TaskError};
use super::model::Task;

/// Unanchored time token, used to find the time inside a line
static TIME_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[01]?[0-9]|2[0-3]):[0-5][0-9]\b").unwrap());

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Parse a single, already-trimmed line into a task.
///
/// Only the first time token is removed. A second time-like substring stays
/// in the description.
pub fn parse_line(line: &str) -> Result<Task> {
    let token = TIME_TOKEN_RE
        .find(line)
        .ok_or_else(|| TaskError::MissingTime(line.to_string()))?;

    let remainder = format!("{}{}", &line[..token.start()], &line[token.end()..]);
    let description = normalize_description(&remainder);
    if description.is_empty() {
        return Err(TaskError::EmptyDescription(line.to_string()));
    }

    Task::new(token.as_str(), &description)
}

fn normalize_description(raw: &str) -> String {
    let stripped = raw.trim_matches(|c| c == ' ' || c == '-');
    WHITESPACE_RE.replace_all(stripped, " ").trim().to_string()
}

/// Parse every task line in `text`, in line order.
///
/// Never fails: a bad line is logged and skipped.
pub fn parse_tasks_from_text(text: &str) -> Vec<Task> {
    let mut tasks = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line_num = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match parse_line(line) {
            Ok(task) => {
                debug!(line = line_num, task = %task, "Parsed task");
                tasks.push(task);
            }
            Err(TaskError::MissingTime(_)) => {
                warn!(line = line_num, "No time found in task line: {:?}", line);
            }
            Err(TaskError::EmptyDescription(_)) => {
                warn!(line = line_num, "Empty task description");
            }
            Err(e) => {
                error!(line = line_num, "Invalid task line: {}", e);
            }
        }
    }

    tasks
}

/// Check a single line of user input before it is written to the file
pub fn try_validate_task_input(input: &str) -> Result<Task> {
    parse_line(input.trim())
}

pub fn validate_task_input(input: &str) -> bool {
    try_validate_task_input(input).is_ok()
}
