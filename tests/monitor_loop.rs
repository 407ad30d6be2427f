//! Monitoring loop tests: dispatch, cancellation, recovery

use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tempfile::TempDir;
use tick_reminder::{MonitorError, MonitorSettings, MonitorState, Notifier, Task, TaskManager};
use tokio_util::sync::CancellationToken;

// 00:00 is due at any time of day
const ALWAYS_DUE: &str = "00:00 - Always due\n";

#[derive(Clone, Default)]
struct Recorder {
    delivered: Arc<Mutex<Vec<Task>>>,
    attempts: Arc<AtomicUsize>,
    failures_left: Arc<AtomicUsize>,
}

impl Recorder {
    fn failing_first(n: usize) -> Self {
        let recorder = Self::default();
        recorder.failures_left.store(n, Ordering::SeqCst);
        recorder
    }

    fn delivered(&self) -> Vec<Task> {
        self.delivered.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for Recorder {
    async fn notify(&self, task: &Task) -> anyhow::Result<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let failing = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            anyhow::bail!("terminal unavailable");
        }
        self.delivered.lock().unwrap().push(task.clone());
        Ok(())
    }
}

fn fast_settings() -> MonitorSettings {
    MonitorSettings {
        poll_interval: Duration::from_millis(10),
        error_backoff: Duration::from_millis(30),
    }
}

fn setup(content: &str, recorder: &Recorder) -> (TempDir, TaskManager) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, content).unwrap();
    let manager =
        TaskManager::new(&path, Box::new(recorder.clone())).with_settings(fast_settings());
    (dir, manager)
}

async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}

#[tokio::test]
async fn test_monitor_fires_due_task_once() {
    let recorder = Recorder::default();
    let (_dir, mut manager) = setup(ALWAYS_DUE, &recorder);
    let status = manager.status_handle();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move {
            let result = manager.monitor_tasks(&cancel).await;
            (manager, result)
        }
    });

    wait_until(|| !recorder.delivered().is_empty()).await;
    assert_eq!(status.state(), MonitorState::Running);

    // Several more ticks with an unchanged file must not re-fire it
    tokio::time::sleep(Duration::from_millis(60)).await;
    cancel.cancel();

    let (manager, result) = handle.await.unwrap();
    assert!(matches!(result, Err(MonitorError::Cancelled)));
    assert_eq!(recorder.delivered(), vec![Task::new("00:00", "Always due").unwrap()]);
    assert!(manager.tasks().is_empty());
    assert_eq!(status.state(), MonitorState::Idle);
}

#[tokio::test]
async fn test_monitor_picks_up_file_changes() {
    let recorder = Recorder::default();
    let (dir, mut manager) = setup("", &recorder);
    let path = dir.path().join("tasks.txt");
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { manager.monitor_tasks(&cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(recorder.delivered().is_empty());

    fs::write(&path, ALWAYS_DUE).unwrap();
    fs::File::options()
        .append(true)
        .open(&path)
        .unwrap()
        .set_modified(std::time::SystemTime::now() + Duration::from_secs(10))
        .unwrap();

    wait_until(|| recorder.delivered().len() == 1).await;
    cancel.cancel();
    assert!(handle.await.unwrap().is_err());
}

#[tokio::test]
async fn test_monitor_recovers_from_notification_error() {
    let recorder = Recorder::failing_first(1);
    let (_dir, mut manager) = setup(ALWAYS_DUE, &recorder);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { manager.monitor_tasks(&cancel).await }
    });

    wait_until(|| recorder.delivered().len() == 1).await;
    cancel.cancel();
    assert!(matches!(handle.await.unwrap(), Err(MonitorError::Cancelled)));
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 2);
}

/// Let spawned tasks run without moving the paused clock
async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(start_paused = true)]
async fn test_monitor_waits_error_backoff_before_retry() {
    let recorder = Recorder::failing_first(1);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.txt");
    fs::write(&path, ALWAYS_DUE).unwrap();
    let mut manager =
        TaskManager::new(&path, Box::new(recorder.clone())).with_settings(MonitorSettings {
            poll_interval: Duration::from_secs(1),
            error_backoff: Duration::from_secs(5),
        });
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { manager.monitor_tasks(&cancel).await }
    });

    settle().await;
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 1);

    // A healthy poll interval later the failed task must still be waiting
    tokio::time::advance(Duration::from_secs(1)).await;
    settle().await;
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 1);

    tokio::time::advance(Duration::from_millis(4100)).await;
    settle().await;
    assert_eq!(recorder.attempts.load(Ordering::SeqCst), 2);
    assert_eq!(recorder.delivered().len(), 1);

    cancel.cancel();
    assert!(matches!(handle.await.unwrap(), Err(MonitorError::Cancelled)));
}

#[tokio::test]
async fn test_monitor_survives_missing_file() {
    let recorder = Recorder::default();
    let dir = TempDir::new().unwrap();
    let mut manager = TaskManager::new(dir.path().join("gone.txt"), Box::new(recorder.clone()))
        .with_settings(fast_settings());
    let status = manager.status_handle();
    let cancel = CancellationToken::new();

    let handle = tokio::spawn({
        let cancel = cancel.clone();
        async move { manager.monitor_tasks(&cancel).await }
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(status.is_monitoring());
    assert!(!handle.is_finished());

    cancel.cancel();
    assert!(handle.await.unwrap().is_err());
    assert!(!status.is_monitoring());
}

#[tokio::test]
async fn test_precancelled_token_runs_one_tick() {
    let recorder = Recorder::default();
    let (_dir, mut manager) = setup(ALWAYS_DUE, &recorder);
    let cancel = CancellationToken::new();
    cancel.cancel();

    let result = manager.monitor_tasks(&cancel).await;

    assert!(matches!(result, Err(MonitorError::Cancelled)));
    assert_eq!(recorder.delivered().len(), 1);
    assert_eq!(manager.monitor_state(), MonitorState::Idle);
}
