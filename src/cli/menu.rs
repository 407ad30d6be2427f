//! Interactive menu (default when no subcommand is given)

use anyhow::Result;
use std::future::Future;
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use super::add::save_task;
use super::list::{read_listing, render_listing};
use crate::config::Config;
use crate::schedule::TaskManager;
use crate::task::{try_validate_task_input, Task};

const CONFIRM_ANSWERS: &[&str] = &["да", "д", "yes", "y"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    ListAll,
    AddTask,
    Monitor,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::ListAll),
            "2" => Some(Self::AddTask),
            "3" => Some(Self::Monitor),
            "4" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn is_confirmation(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    CONFIRM_ANSWERS.contains(&answer.as_str())
}

/// Read one answer unless `interrupt` resolves first; both cases of giving up yield `None`
async fn read_or_interrupt(
    read: impl Future<Output = io::Result<Option<String>>>,
    interrupt: impl Future<Output = io::Result<()>>,
) -> Result<Option<String>> {
    tokio::select! {
        line = read => Ok(line?.map(|l| l.trim().to_string())),
        _ = interrupt => {
            println!();
            tracing::info!("Interrupted at the menu prompt");
            Ok(None)
        }
    }
}

/// Line-based stdin prompt; `None` means stdin was closed or Ctrl+C was pressed
struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        print!("{}", question);
        std::io::stdout().flush()?;
        // Monitoring installs a SIGINT handler for the rest of the process,
        // so the prompt has to watch for Ctrl+C itself
        read_or_interrupt(self.lines.next_line(), tokio::signal::ctrl_c()).await
    }

    /// Ask until the input is a valid task line
    async fn ask_task(&mut self) -> Result<Option<Task>> {
        println!();
        super::print_format_help();

        loop {
            let Some(input) = self.ask("\nEnter your task: ").await? else {
                return Ok(None);
            };
            if input.is_empty() {
                println!("The task cannot be empty. Try again.");
                continue;
            }
            match try_validate_task_input(&input) {
                Ok(task) => return Ok(Some(task)),
                Err(e) => {
                    tracing::debug!("Rejected task input: {}", e);
                    super::print_format_errors();
                    println!("Try again.");
                }
            }
        }
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let mut prompt = Prompt::new();
    let path = config.tasks_file.clone();

    if !path.exists() {
        println!("Tasks file {} not found.", path.display());
        let answer = prompt
            .ask("Create it and add a task? (yes/no): ")
            .await?
            .unwrap_or_default();
        if !is_confirmation(&answer) {
            println!("Exiting.");
            return Ok(());
        }

        let Some(task) = prompt.ask_task().await? else {
            return Ok(());
        };
        save_task(&path, &task)?;
        println!("\n✓ Created {} with task: {}", path.display(), task);
    }

    let mut manager = TaskManager::from_config(config);

    loop {
        println!("\n{}", "=".repeat(50));
        println!("TASK MENU");
        println!("{}", "=".repeat(50));
        println!("1. Show all tasks");
        println!("2. Add a task");
        println!("3. Start monitoring");
        println!("4. Exit");

        let Some(input) = prompt.ask("\nChoose an action (1-4): ").await? else {
            break;
        };

        match MenuChoice::parse(&input) {
            Some(MenuChoice::ListAll) => {
                let listing = read_listing(&path)?;
                print!("{}", render_listing(&listing, chrono::Local::now().time()));
            }
            Some(MenuChoice::AddTask) => {
                println!("\nAdd a task");
                let Some(task) = prompt.ask_task().await? else {
                    break;
                };
                match save_task(&path, &task) {
                    Ok(()) => {
                        println!("\n✓ Task added: {}", task);
                        manager.load_tasks();
                    }
                    Err(e) => println!("Failed to add task: {}", e),
                }
            }
            Some(MenuChoice::Monitor) => super::monitor::start(&mut manager).await?,
            Some(MenuChoice::Exit) => {
                println!("Goodbye!");
                break;
            }
            None => println!("Invalid choice. Please enter a number from 1 to 4."),
        }
    }

    Ok(())
}
