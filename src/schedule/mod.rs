//! Schedule module
//!
//! Ties the tasks file to the clock:
//! - `loader`: reload the file only when it changed
//! - `dispatch`: notify due tasks once and retire them
//! - `monitor`: the cancellable polling loop

pub mod dispatch;
pub mod error;
pub mod loader;
pub mod monitor;

pub use dispatch::dispatch_due;
pub use error::{LoadError, MonitorError};
pub use loader::{LoadOutcome, TaskLoader};
pub use monitor::{MonitorSettings, MonitorState, MonitorStatus};

use chrono::{Local, NaiveTime};
use std::collections::HashSet;
use std::path::Path;

use crate::config::Config;
use crate::notification::{ConsoleNotifier, Notifier};
use crate::task::Task;

/// Owns the pending task set for one tasks file.
///
/// The loader is the only writer of the set (wholesale replacement) and the
/// dispatcher the only remover.
pub struct TaskManager {
    loader: TaskLoader,
    tasks: Vec<Task>,
    notifier: Box<dyn Notifier>,
    settings: MonitorSettings,
    status: MonitorStatus,
    suppress_refired: bool,
    dispatched: HashSet<Task>,
}

impl TaskManager {
    pub fn new(path: impl AsRef<Path>, notifier: Box<dyn Notifier>) -> Self {
        Self {
            loader: TaskLoader::new(path),
            tasks: Vec::new(),
            notifier,
            settings: MonitorSettings::default(),
            status: MonitorStatus::default(),
            suppress_refired: false,
            dispatched: HashSet::new(),
        }
    }

    /// Manager for the configured tasks file with the console notifier
    pub fn from_config(config: &Config) -> Self {
        let notifier = ConsoleNotifier::new(&config.notification);
        Self::new(&config.tasks_file, Box::new(notifier))
            .with_settings(MonitorSettings::from(&config.monitor))
            .with_suppress_refired(config.monitor.suppress_refired)
    }

    pub fn with_settings(mut self, settings: MonitorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Keep already-dispatched tasks out of later reloads
    pub fn with_suppress_refired(mut self, suppress: bool) -> Self {
        self.suppress_refired = suppress;
        self
    }

    pub fn tasks_file(&self) -> &Path {
        self.loader.path()
    }

    /// Pending tasks in file order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn monitor_state(&self) -> MonitorState {
        self.status.state()
    }

    pub fn is_monitoring(&self) -> bool {
        self.status.is_monitoring()
    }

    /// Handle for observing the loop from elsewhere while it runs
    pub fn status_handle(&self) -> MonitorStatus {
        self.status.clone()
    }

    /// Reload the tasks file if it changed and replace the pending set.
    ///
    /// On error the pending set and the watermark are left untouched.
    pub fn try_load_tasks(&mut self) -> Result<LoadOutcome, LoadError> {
        let outcome = self.loader.load()?;
        match &outcome {
            LoadOutcome::Unchanged => {}
            LoadOutcome::Cleared => self.tasks.clear(),
            LoadOutcome::Loaded(tasks) => {
                let mut tasks = tasks.clone();
                if self.suppress_refired {
                    tasks.retain(|task| !self.dispatched.contains(task));
                }
                tracing::info!(
                    path = %self.loader.path().display(),
                    "Loaded {} tasks",
                    tasks.len()
                );
                self.tasks = tasks;
            }
        }
        Ok(outcome)
    }

    /// `try_load_tasks` for callers that only need success or failure;
    /// an unchanged file counts as success
    pub fn load_tasks(&mut self) -> bool {
        match self.try_load_tasks() {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("{}", e);
                false
            }
        }
    }

    /// One dispatch pass against the local clock
    pub async fn check_and_notify(&mut self) -> anyhow::Result<Vec<Task>> {
        self.check_and_notify_at(Local::now().time()).await
    }

    /// One dispatch pass as if the time were `now`
    pub async fn check_and_notify_at(&mut self, now: NaiveTime) -> anyhow::Result<Vec<Task>> {
        let result = dispatch_due(&mut self.tasks, self.notifier.as_ref(), now).await;
        if let Ok(fired) = &result {
            self.dispatched.extend(fired.iter().cloned());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::fs;
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Task>>>);

    #[async_trait]
    impl Notifier for Recorder {
        async fn notify(&self, task: &Task) -> anyhow::Result<()> {
            self.0.lock().unwrap().push(task.clone());
            Ok(())
        }
    }

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn setup(content: &str) -> (TempDir, TaskManager, Recorder) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, content).unwrap();
        let recorder = Recorder::default();
        let manager = TaskManager::new(&path, Box::new(recorder.clone()));
        (dir, manager, recorder)
    }

    #[test]
    fn test_new_manager_is_idle_and_empty() {
        let (_dir, manager, _) = setup("");
        assert!(manager.tasks().is_empty());
        assert_eq!(manager.monitor_state(), MonitorState::Idle);
        assert!(!manager.is_monitoring());
    }

    #[test]
    fn test_load_tasks_success() {
        let (_dir, mut manager, _) = setup("09:00 - A\n12:30 - B\n15:45 - C\n");
        assert!(manager.load_tasks());
        assert_eq!(manager.tasks().len(), 3);
    }

    #[test]
    fn test_load_tasks_missing_file() {
        let dir = TempDir::new().unwrap();
        let mut manager =
            TaskManager::new(dir.path().join("nonexistent.txt"), Box::new(Recorder::default()));
        assert!(!manager.load_tasks());
        assert!(manager.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_unchanged_reload_keeps_dispatch_removals() {
        let (_dir, mut manager, recorder) = setup("09:00 - A\n12:30 - B\n15:45 - C\n");
        assert!(manager.load_tasks());

        manager.check_and_notify_at(at(10, 0)).await.unwrap();
        assert_eq!(manager.tasks().len(), 2);

        // File untouched: the reload is a no-op and does not re-admit A
        assert!(manager.load_tasks());
        assert_eq!(manager.tasks().len(), 2);
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_empty_file_clears_previous_tasks() {
        let (dir, mut manager, _) = setup("09:00 - A\n");
        assert!(manager.load_tasks());
        assert_eq!(manager.tasks().len(), 1);

        let path = dir.path().join("tasks.txt");
        fs::write(&path, "   \n").unwrap();
        bump_mtime(&path);

        assert!(manager.load_tasks());
        assert!(manager.tasks().is_empty());
    }

    #[tokio::test]
    async fn test_changed_file_readmits_dispatched_task() {
        let (dir, mut manager, recorder) = setup("09:00 - A\n");
        manager.load_tasks();
        manager.check_and_notify_at(at(10, 0)).await.unwrap();
        assert!(manager.tasks().is_empty());

        bump_mtime(&dir.path().join("tasks.txt"));
        manager.load_tasks();
        assert_eq!(manager.tasks().len(), 1);

        manager.check_and_notify_at(at(10, 0)).await.unwrap();
        assert_eq!(recorder.0.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_suppress_refired_drops_dispatched_task() {
        let (dir, manager, recorder) = setup("09:00 - A\n11:00 - B\n");
        let mut manager = manager.with_suppress_refired(true);
        manager.load_tasks();
        manager.check_and_notify_at(at(10, 0)).await.unwrap();

        bump_mtime(&dir.path().join("tasks.txt"));
        manager.load_tasks();

        assert_eq!(manager.tasks(), &[Task::new("11:00", "B").unwrap()]);
        assert_eq!(recorder.0.lock().unwrap().len(), 1);
    }

    fn bump_mtime(path: &Path) {
        let later = std::time::SystemTime::now() + std::time::Duration::from_secs(10);
        fs::File::options()
            .append(true)
            .open(path)
            .unwrap()
            .set_modified(later)
            .unwrap();
    }
}
