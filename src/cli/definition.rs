//! CLI argument definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::add::AddArgs;
use super::list::ListArgs;

/// Plain-text task reminder
#[derive(Parser)]
#[command(name = "tick")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Tasks file to use (overrides `tasks_file` from the config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Config file (defaults to the platform config dir)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every task in the file, marking the ones already due
    #[command(alias = "ls")]
    List(ListArgs),

    /// Add a task line ("HH:MM - description")
    Add(AddArgs),

    /// Watch the tasks file and ring when tasks come due (Ctrl+C to stop)
    Monitor,
}
