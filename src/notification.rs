//! Reminder delivery
//!
//! The dispatcher talks to a [`Notifier`]. The console notifier rings the
//! terminal bell, prints a banner on stdout, and optionally plays a sound
//! file through the system audio player.

use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

use crate::config::NotificationConfig;
use crate::sound;
use crate::task::Task;

/// Side effect fired once per due task
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, task: &Task) -> Result<()>;
}

#[derive(Debug, Clone)]
pub struct ConsoleNotifier {
    bell: bool,
    banner_width: usize,
    sound: Option<PathBuf>,
}

impl ConsoleNotifier {
    pub fn new(config: &NotificationConfig) -> Self {
        let sound = if config.sound.trim().is_empty() {
            None
        } else {
            Some(PathBuf::from(config.sound.trim()))
        };

        Self {
            bell: config.bell,
            banner_width: config.banner_width,
            sound,
        }
    }

    /// The framed text block shown for a reminder
    pub fn banner(&self, task: &Task) -> String {
        let rule = "=".repeat(self.banner_width);
        format!("\n{rule}\nREMINDER: {task}\n{rule}\n\n")
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new(&NotificationConfig::default())
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    async fn notify(&self, task: &Task) -> Result<()> {
        let mut stdout = tokio::io::stdout();
        if self.bell {
            stdout.write_all(b"\x07").await?;
        }
        stdout.write_all(self.banner(task).as_bytes()).await?;
        stdout.flush().await?;

        // A broken sound setup must not block the reminder itself
        if let Some(path) = &self.sound {
            if let Err(e) = sound::play_file(path).await {
                tracing::warn!(sound = %path.display(), "Failed to play reminder sound: {:#}", e);
            }
        }

        Ok(())
    }
}
