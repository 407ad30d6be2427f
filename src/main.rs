//! tick - plain-text task reminder

use anyhow::Result;
use clap::Parser;
use tick_reminder::cli::{self, Cli, Commands};
use tick_reminder::{config, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(file) = cli.file {
        config.tasks_file = file;
    }

    // Held until exit so buffered log lines reach the file
    let _log_guard = logging::init(&config.log)?;

    match cli.command {
        Some(Commands::List(args)) => cli::list::run(&config, args),
        Some(Commands::Add(args)) => cli::add::run(&config, args),
        Some(Commands::Monitor) => cli::monitor::run(&config).await,
        None => cli::menu::run(&config).await,
    }
}
