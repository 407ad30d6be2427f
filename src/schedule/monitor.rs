//! Monitoring loop
//!
//! Idle -> Running -> Stopping -> Idle. The loop reloads the tasks file,
//! dispatches due tasks, then waits for the next tick. Cancellation is only
//! observed while waiting, so a tick in progress always completes.

use std::convert::Infallible;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use super::error::MonitorError;
use super::TaskManager;
use crate::config::MonitorConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Idle,
    Running,
    Stopping,
}

impl MonitorState {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => Self::Running,
            2 => Self::Stopping,
            _ => Self::Idle,
        }
    }

    fn as_u8(self) -> u8 {
        match self {
            Self::Idle => 0,
            Self::Running => 1,
            Self::Stopping => 2,
        }
    }
}

/// Shared view of the monitor state; clones observe the same loop
#[derive(Debug, Clone, Default)]
pub struct MonitorStatus(Arc<AtomicU8>);

impl MonitorStatus {
    pub fn state(&self) -> MonitorState {
        MonitorState::from_u8(self.0.load(Ordering::SeqCst))
    }

    pub fn is_monitoring(&self) -> bool {
        self.state() != MonitorState::Idle
    }

    fn set(&self, state: MonitorState) {
        self.0.store(state.as_u8(), Ordering::SeqCst);
    }

    /// Enter Running; the guard puts the state back to Idle when dropped
    fn enter(&self) -> MonitorGuard {
        self.set(MonitorState::Running);
        info!("Task monitoring started");
        MonitorGuard {
            status: self.clone(),
        }
    }
}

struct MonitorGuard {
    status: MonitorStatus,
}

impl MonitorGuard {
    fn stopping(&self) {
        self.status.set(MonitorState::Stopping);
    }
}

impl Drop for MonitorGuard {
    fn drop(&mut self) {
        self.status.set(MonitorState::Idle);
        info!("Task monitoring stopped");
    }
}

/// Tick timing for the monitoring loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSettings {
    /// Wait between healthy ticks
    pub poll_interval: Duration,
    /// Wait after a tick that failed
    pub error_backoff: Duration,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(1),
            error_backoff: Duration::from_secs(5),
        }
    }
}

/// Shortest wait the config file may ask for; zero would turn the loop into a spin
const MIN_CONFIGURED_SECS: u64 = 1;

impl From<&MonitorConfig> for MonitorSettings {
    fn from(config: &MonitorConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(config.poll_interval_secs.max(MIN_CONFIGURED_SECS)),
            error_backoff: Duration::from_secs(config.error_backoff_secs.max(MIN_CONFIGURED_SECS)),
        }
    }
}

impl TaskManager {
    /// Run the monitoring loop until `cancel` fires.
    ///
    /// Never returns on its own. Errors inside a tick are logged and followed
    /// by the longer back-off; only cancellation ends the loop, and the state
    /// is back to Idle by the time the error reaches the caller.
    pub async fn monitor_tasks(
        &mut self,
        cancel: &CancellationToken,
    ) -> Result<Infallible, MonitorError> {
        let guard = self.status.enter();

        loop {
            let pause = match self.tick().await {
                Ok(()) => self.settings.poll_interval,
                Err(e) => {
                    error!("Unexpected error in monitoring loop: {:#}", e);
                    self.settings.error_backoff
                }
            };

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    guard.stopping();
                    info!("Task monitoring was cancelled");
                    return Err(MonitorError::Cancelled);
                }
                _ = tokio::time::sleep(pause) => {}
            }
        }
    }

    /// One iteration: reload if the file changed, then dispatch
    async fn tick(&mut self) -> anyhow::Result<()> {
        // A failed load is already logged; keep dispatching the last good set
        self.load_tasks();
        self.check_and_notify().await?;
        Ok(())
    }
}
