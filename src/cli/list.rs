//! `tick list` command implementation

use anyhow::{Context, Result};
use chrono::{Local, NaiveTime};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::config::Config;
use crate::task::{parse_tasks_from_text, Task, TimeOfDay};

#[derive(Args, Default)]
pub struct ListArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Serialize)]
struct TaskJson<'a> {
    time: TimeOfDay,
    description: &'a str,
    due: bool,
}

/// What the tasks file holds right now, read fresh from disk
#[derive(Debug, PartialEq, Eq)]
pub enum Listing {
    MissingFile,
    EmptyFile,
    NoTasks,
    Tasks(Vec<Task>),
}

pub fn read_listing(path: &Path) -> Result<Listing> {
    if !path.exists() {
        return Ok(Listing::MissingFile);
    }

    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read tasks file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(Listing::EmptyFile);
    }

    let tasks = parse_tasks_from_text(&content);
    if tasks.is_empty() {
        return Ok(Listing::NoTasks);
    }
    Ok(Listing::Tasks(tasks))
}

/// Human-readable listing; `[✓]` marks tasks already due at `now`
pub fn render_listing(listing: &Listing, now: NaiveTime) -> String {
    match listing {
        Listing::MissingFile => "Tasks file does not exist\n".to_string(),
        Listing::EmptyFile => "Tasks file is empty\n".to_string(),
        Listing::NoTasks => "No tasks in file\n".to_string(),
        Listing::Tasks(tasks) => {
            let mut out = String::from("\nAll tasks in file:\n");
            for (i, task) in tasks.iter().enumerate() {
                let status = if task.should_notify(now) { "✓" } else { " " };
                out.push_str(&format!("  {}. [{}] {}\n", i + 1, status, task));
            }
            out.push_str(&"-".repeat(50));
            out.push('\n');
            out
        }
    }
}

pub fn run(config: &Config, args: ListArgs) -> Result<()> {
    let listing = read_listing(&config.tasks_file)?;
    let now = Local::now().time();

    if args.json {
        let tasks: &[Task] = match &listing {
            Listing::Tasks(tasks) => tasks.as_slice(),
            _ => &[],
        };
        let json: Vec<TaskJson> = tasks
            .iter()
            .map(|t| TaskJson {
                time: t.time(),
                description: t.description(),
                due: t.should_notify(now),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&json)?);
        return Ok(());
    }

    print!("{}", render_listing(&listing, now));
    Ok(())
}
