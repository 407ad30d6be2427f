//! CLI command implementations

pub mod add;
pub mod definition;
pub mod list;
pub mod menu;
pub mod monitor;

pub use definition::{Cli, Commands};

use crate::task::Task;

const RULE_WIDTH: usize = 50;

/// Numbered list of the pending tasks
pub fn render_loaded_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No pending tasks\n".to_string();
    }

    let mut out = String::from("\nPending tasks:\n");
    for (i, task) in tasks.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, task));
    }
    out.push_str(&"-".repeat(RULE_WIDTH));
    out.push('\n');
    out
}

pub fn print_format_help() {
    println!("Format: HH:MM - task description");
    println!("Example: 14:30 - Team sync");
}

pub fn print_format_errors() {
    println!("Invalid task. Make sure that:");
    println!("- the time is HH:MM (e.g. 09:30 or 14:00)");
    println!("- a description follows the time");
    println!("- time and description are separated by ' - ' or spaces");
}
