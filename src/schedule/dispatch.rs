//! Due-task dispatch

use anyhow::Result;
use chrono::NaiveTime;

use crate::notification::Notifier;
use crate::task::Task;

/// Notify every task due at `now` and retire it from `pending`.
///
/// Due tasks are picked from a snapshot, notified in order, and removed only
/// after the scan, so the remaining tasks keep their relative order. If a
/// notification fails the scan stops there: tasks already notified are still
/// retired and the error is returned.
pub async fn dispatch_due(
    pending: &mut Vec<Task>,
    notifier: &dyn Notifier,
    now: NaiveTime,
) -> Result<Vec<Task>> {
    let due: Vec<Task> = pending
        .iter()
        .filter(|task| task.should_notify(now))
        .cloned()
        .collect();

    let mut fired = Vec::with_capacity(due.len());
    let mut failure = None;
    for task in due {
        if let Err(e) = notifier.notify(&task).await {
            failure = Some(e.context(format!("notification failed for '{}'", task)));
            break;
        }
        tracing::info!(task = %task, "Notification sent");
        fired.push(task);
    }

    retire(pending, &fired);

    match failure {
        Some(e) => Err(e),
        None => Ok(fired),
    }
}

/// Remove one pending entry per fired task (the first equal one)
fn retire(pending: &mut Vec<Task>, fired: &[Task]) {
    for task in fired {
        if let Some(pos) = pending.iter().position(|p| p == task) {
            pending.remove(pos);
        }
    }
}
