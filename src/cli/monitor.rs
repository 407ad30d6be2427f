//! `tick monitor` command implementation

use anyhow::Result;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::schedule::{MonitorError, TaskManager};

pub async fn run(config: &Config) -> Result<()> {
    let mut manager = TaskManager::from_config(config);
    start(&mut manager).await
}

/// Load, show the pending set, and monitor until Ctrl+C
pub async fn start(manager: &mut TaskManager) -> Result<()> {
    if !manager.load_tasks() {
        println!("Failed to load tasks from {}.", manager.tasks_file().display());
        return Ok(());
    }

    if manager.tasks().is_empty() {
        println!("No pending tasks to monitor.");
        println!("Add tasks with a time later today.");
        return Ok(());
    }

    print!("{}", super::render_loaded_tasks(manager.tasks()));
    println!("Monitoring started. Press Ctrl+C to stop.");

    let cancel = CancellationToken::new();
    let ctrl_c = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        }
    });

    let Err(reason) = manager.monitor_tasks(&cancel).await;
    ctrl_c.abort();

    match reason {
        MonitorError::Cancelled => {
            tracing::info!("Monitoring stopped by user");
            println!("\nMonitoring stopped.");
        }
    }
    Ok(())
}
