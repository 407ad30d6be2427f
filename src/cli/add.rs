//! `tick add` command implementation

use anyhow::{bail, Result};
use clap::Args;
use std::path::Path;

use crate::config::Config;
use crate::task::{add_task_to_file, create_file_with_task, try_validate_task_input, Task};

#[derive(Args)]
pub struct AddArgs {
    /// Task line, e.g. `14:30 - Team sync` (quotes optional)
    #[arg(required = true, num_args = 1..)]
    pub line: Vec<String>,
}

/// Write a task in canonical `HH:MM - description` form, creating the file
/// when it does not exist yet
pub fn save_task(path: &Path, task: &Task) -> Result<()> {
    let line = task.to_string();
    let written = if path.exists() {
        add_task_to_file(path, &line)
    } else {
        create_file_with_task(path, &line)
    };

    if !written {
        bail!("Could not write task to {}", path.display());
    }
    Ok(())
}

pub fn run(config: &Config, args: AddArgs) -> Result<()> {
    let input = args.line.join(" ");
    let task = match try_validate_task_input(&input) {
        Ok(task) => task,
        Err(e) => {
            super::print_format_errors();
            super::print_format_help();
            bail!(e);
        }
    };

    save_task(&config.tasks_file, &task)?;
    println!("✓ Added task: {}", task);
    Ok(())
}
