//! xtask - Development tasks for tick-reminder

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::Path;

use tick_reminder::config::Config;

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for tick-reminder")]
struct Xtask {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the CLI reference and an example config file
    GenDocs,

    /// Write a sample tasks file for manual testing
    Sample {
        /// Where to write the file
        #[arg(default_value = "tasks.sample.txt")]
        path: String,
    },
}

fn main() -> Result<()> {
    let args = Xtask::parse();
    match args.command {
        Commands::GenDocs => generate_docs(),
        Commands::Sample { path } => write_sample(Path::new(&path)),
    }
}

fn generate_docs() -> Result<()> {
    let docs_dir = Path::new("docs");
    fs::create_dir_all(docs_dir.join("cli")).context("creating docs/cli")?;

    let markdown = clap_markdown::help_markdown::<tick_reminder::cli::Cli>();
    let cli_path = docs_dir.join("cli").join("reference.md");
    fs::write(&cli_path, markdown).context("writing CLI reference")?;
    println!("Generated CLI documentation at {}", cli_path.display());

    let config = toml::to_string_pretty(&Config::default())?;
    let config_path = docs_dir.join("config.example.toml");
    fs::write(&config_path, config).context("writing example config")?;
    println!("Generated example config at {}", config_path.display());

    Ok(())
}

fn write_sample(path: &Path) -> Result<()> {
    let now = chrono::Local::now();
    let mut lines = vec!["# generated by `cargo xtask sample`".to_string()];
    for (offset, label) in [(1, "Stretch"), (2, "Check the oven"), (5, "Standup")] {
        let at = now + chrono::Duration::minutes(offset);
        lines.push(format!("{} - {}", at.format("%H:%M"), label));
    }
    lines.push(String::new());

    fs::write(path, lines.join("\n")).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote sample tasks to {}", path.display());
    Ok(())
}
