//! Task registry: lifecycle state for asynchronous video acquisitions.
//!
//! Each acquisition runs on its own worker; the registry is the only shared
//! state. Transitions are forward-only (pending -> downloading -> completed
//! or error) and terminal states are frozen: late progress reports and
//! duplicate completions are ignored rather than rejected, since a worker
//! racing a sweep is normal operation.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant, SystemTime};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use framepress_common::{opaque_id, FramepressError, FramepressResult};

/// Lifecycle state of one acquisition task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    Downloading,
    Completed,
    Error,
}

impl TaskStatus {
    /// Terminal states never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Error)
    }
}

/// Payload of a successfully completed acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskResult {
    /// File name of the downloaded video, relative to the downloads dir.
    pub file_name: String,
    pub title: String,
    pub duration_ms: u64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
}

/// Point-in-time view of a task, safe to hand to callers.
#[derive(Debug, Clone, Serialize)]
pub struct TaskSnapshot {
    pub id: String,
    pub status: TaskStatus,
    /// Download progress in percent, 0.0 to 100.0.
    pub progress: f64,
    pub message: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

struct TaskEntry {
    status: TaskStatus,
    progress: f64,
    message: String,
    /// Destination file name, registered by the worker before the download
    /// starts so the sweep can tell live downloads from orphans.
    output_file: Option<String>,
    result: Option<TaskResult>,
    error: Option<String>,
    /// Wall-clock creation time, surfaced in snapshots.
    created_at: DateTime<Utc>,
    /// Monotonic creation time, used for eviction ordering.
    created_seq: Instant,
}

/// Retention rules applied by [`TaskRegistry::sweep`].
#[derive(Debug, Clone)]
pub struct SweepPolicy {
    /// Downloaded files older than this are deleted.
    pub retention: Duration,

    /// Terminal tasks beyond this count are evicted, oldest first.
    pub max_tracked: usize,
}

impl Default for SweepPolicy {
    fn default() -> Self {
        Self {
            retention: Duration::from_secs(3600),
            max_tracked: 100,
        }
    }
}

/// What a sweep pass removed.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SweepReport {
    pub files_deleted: usize,
    pub tasks_evicted: usize,
}

/// Shared registry of acquisition tasks.
pub struct TaskRegistry {
    tasks: Mutex<HashMap<String, TaskEntry>>,
    policy: SweepPolicy,
}

impl TaskRegistry {
    pub fn new(policy: SweepPolicy) -> Self {
        Self {
            tasks: Mutex::new(HashMap::new()),
            policy,
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, TaskEntry>> {
        // A poisoned lock means a panic mid-update; the map itself is still
        // consistent because every mutation is a single assignment.
        self.tasks.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Register a new pending task and return its id.
    pub fn create(&self) -> String {
        let id = opaque_id();
        let entry = TaskEntry {
            status: TaskStatus::Pending,
            progress: 0.0,
            message: "queued".to_string(),
            output_file: None,
            result: None,
            error: None,
            created_at: Utc::now(),
            created_seq: Instant::now(),
        };
        self.lock().insert(id.clone(), entry);
        tracing::info!(task_id = %id, "Created acquisition task");
        id
    }

    /// Record the destination file name the worker will write to.
    ///
    /// Must happen before the download starts so the file is protected from
    /// sweeps while the task is live.
    pub fn assign_output(&self, id: &str, file_name: &str) {
        let mut tasks = self.lock();
        if let Some(entry) = tasks.get_mut(id) {
            entry.output_file = Some(file_name.to_string());
        }
    }

    /// Report download progress.
    ///
    /// The first report moves a pending task to downloading. Progress is
    /// clamped to 0..=100 and never moves backwards; reports against a
    /// terminal task are dropped.
    pub fn report_progress(&self, id: &str, percent: f64, message: &str) {
        let mut tasks = self.lock();
        let Some(entry) = tasks.get_mut(id) else {
            return;
        };
        if entry.status.is_terminal() {
            return;
        }
        if entry.status == TaskStatus::Pending {
            entry.status = TaskStatus::Downloading;
        }
        entry.progress = entry.progress.max(percent.clamp(0.0, 100.0));
        entry.message = message.to_string();
    }

    /// Mark a task completed with its result payload.
    pub fn complete(&self, id: &str, result: TaskResult) {
        let mut tasks = self.lock();
        let Some(entry) = tasks.get_mut(id) else {
            return;
        };
        if entry.status.is_terminal() {
            tracing::warn!(task_id = %id, "Ignoring completion of terminal task");
            return;
        }
        tracing::info!(task_id = %id, file = %result.file_name, "Task completed");
        entry.status = TaskStatus::Completed;
        entry.progress = 100.0;
        entry.message = "done".to_string();
        entry.result = Some(result);
    }

    /// Mark a task failed.
    pub fn fail(&self, id: &str, error: &str) {
        let mut tasks = self.lock();
        let Some(entry) = tasks.get_mut(id) else {
            return;
        };
        if entry.status.is_terminal() {
            tracing::warn!(task_id = %id, "Ignoring failure of terminal task");
            return;
        }
        tracing::warn!(task_id = %id, error, "Task failed");
        entry.status = TaskStatus::Error;
        entry.message = "failed".to_string();
        entry.error = Some(error.to_string());
    }

    /// Snapshot a task's current state.
    pub fn get(&self, id: &str) -> FramepressResult<TaskSnapshot> {
        let tasks = self.lock();
        let entry = tasks
            .get(id)
            .ok_or_else(|| FramepressError::not_found(format!("no task with id {id}")))?;
        Ok(TaskSnapshot {
            id: id.to_string(),
            status: entry.status,
            progress: entry.progress,
            message: entry.message.clone(),
            created_at: entry.created_at,
            result: entry.result.clone(),
            error: entry.error.clone(),
        })
    }

    /// Number of tracked tasks, terminal or not.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Delete expired downloads and evict surplus terminal tasks.
    ///
    /// Files belonging to non-terminal tasks are never deleted, whatever
    /// their age. Eviction only considers terminal tasks and removes the
    /// oldest first until the registry fits the policy's cap.
    pub fn sweep(&self, downloads_dir: &Path) -> SweepReport {
        let mut report = SweepReport::default();

        let protected: Vec<String> = {
            let tasks = self.lock();
            tasks
                .values()
                .filter(|e| !e.status.is_terminal())
                .filter_map(|e| e.output_file.clone())
                .collect()
        };

        report.files_deleted = self.sweep_files(downloads_dir, &protected);
        report.tasks_evicted = self.evict_surplus();

        if report.files_deleted > 0 || report.tasks_evicted > 0 {
            tracing::info!(
                files_deleted = report.files_deleted,
                tasks_evicted = report.tasks_evicted,
                "Sweep pass finished"
            );
        }
        report
    }

    fn sweep_files(&self, downloads_dir: &Path, protected: &[String]) -> usize {
        let entries = match std::fs::read_dir(downloads_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::debug!(dir = %downloads_dir.display(), error = %e, "Skipping file sweep");
                return 0;
            }
        };

        let now = SystemTime::now();
        let mut deleted = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if protected.iter().any(|p| *p == name) {
                continue;
            }
            let expired = entry
                .metadata()
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| now.duration_since(modified).ok())
                .map(|age| age >= self.policy.retention)
                .unwrap_or(false);
            if !expired {
                continue;
            }
            match std::fs::remove_file(&path) {
                Ok(()) => {
                    tracing::debug!(file = %path.display(), "Deleted expired download");
                    deleted += 1;
                }
                Err(e) => {
                    tracing::warn!(file = %path.display(), error = %e, "Failed to delete download");
                }
            }
        }
        deleted
    }

    fn evict_surplus(&self) -> usize {
        let mut tasks = self.lock();
        if tasks.len() <= self.policy.max_tracked {
            return 0;
        }

        let mut terminal: Vec<(String, Instant)> = tasks
            .iter()
            .filter(|(_, e)| e.status.is_terminal())
            .map(|(id, e)| (id.clone(), e.created_seq))
            .collect();
        terminal.sort_by_key(|(_, created_seq)| *created_seq);

        let mut evicted = 0;
        for (id, _) in terminal {
            if tasks.len() <= self.policy.max_tracked {
                break;
            }
            tasks.remove(&id);
            evicted += 1;
        }
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_fixture(file_name: &str) -> TaskResult {
        TaskResult {
            file_name: file_name.to_string(),
            title: "Test Video".to_string(),
            duration_ms: 90_000,
            width: 1920,
            height: 1080,
            fps: 30.0,
        }
    }

    #[test]
    fn test_create_starts_pending() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let id = registry.create();
        let snap = registry.get(&id).unwrap();
        assert_eq!(snap.status, TaskStatus::Pending);
        assert_eq!(snap.progress, 0.0);
        assert!(snap.result.is_none());
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_first_progress_report_moves_to_downloading() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let id = registry.create();
        registry.report_progress(&id, 12.5, "downloading");
        let snap = registry.get(&id).unwrap();
        assert_eq!(snap.status, TaskStatus::Downloading);
        assert_eq!(snap.progress, 12.5);
    }

    #[test]
    fn test_progress_is_monotonic_and_clamped() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let id = registry.create();
        registry.report_progress(&id, 40.0, "downloading");
        registry.report_progress(&id, 25.0, "stalled");
        assert_eq!(registry.get(&id).unwrap().progress, 40.0);

        registry.report_progress(&id, 250.0, "overshoot");
        assert_eq!(registry.get(&id).unwrap().progress, 100.0);

        let id2 = registry.create();
        registry.report_progress(&id2, -5.0, "negative");
        assert_eq!(registry.get(&id2).unwrap().progress, 0.0);
    }

    #[test]
    fn test_complete_freezes_task() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let id = registry.create();
        registry.complete(&id, result_fixture("a.mp4"));

        // Late progress and a second completion are dropped.
        registry.report_progress(&id, 10.0, "late");
        registry.complete(&id, result_fixture("b.mp4"));
        registry.fail(&id, "too late");

        let snap = registry.get(&id).unwrap();
        assert_eq!(snap.status, TaskStatus::Completed);
        assert_eq!(snap.progress, 100.0);
        assert_eq!(snap.result.unwrap().file_name, "a.mp4");
        assert!(snap.error.is_none());
    }

    #[test]
    fn test_fail_is_terminal() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let id = registry.create();
        registry.fail(&id, "network unreachable");
        registry.complete(&id, result_fixture("a.mp4"));

        let snap = registry.get(&id).unwrap();
        assert_eq!(snap.status, TaskStatus::Error);
        assert_eq!(snap.error.as_deref(), Some("network unreachable"));
        assert!(snap.result.is_none());
    }

    #[test]
    fn test_get_unknown_task_is_not_found() {
        let registry = TaskRegistry::new(SweepPolicy::default());
        let err = registry.get("no-such-task").unwrap_err();
        assert!(matches!(err, FramepressError::NotFound { .. }));
    }

    #[test]
    fn test_eviction_removes_oldest_terminal_first() {
        let policy = SweepPolicy {
            max_tracked: 100,
            ..SweepPolicy::default()
        };
        let registry = TaskRegistry::new(policy);

        let first = registry.create();
        registry.complete(&first, result_fixture("first.mp4"));
        std::thread::sleep(Duration::from_millis(5));

        for _ in 0..100 {
            let id = registry.create();
            registry.complete(&id, result_fixture("x.mp4"));
        }
        assert_eq!(registry.len(), 101);

        let scratch = std::env::temp_dir().join("framepress-evict-test-nodir");
        let report = registry.sweep(&scratch);
        assert_eq!(report.tasks_evicted, 1);
        assert_eq!(registry.len(), 100);
        // The oldest terminal task went first.
        assert!(registry.get(&first).is_err());
    }

    #[test]
    fn test_eviction_spares_live_tasks() {
        let policy = SweepPolicy {
            max_tracked: 2,
            ..SweepPolicy::default()
        };
        let registry = TaskRegistry::new(policy);

        let live = registry.create();
        registry.report_progress(&live, 50.0, "downloading");
        for _ in 0..4 {
            let id = registry.create();
            registry.complete(&id, result_fixture("x.mp4"));
        }

        let scratch = std::env::temp_dir().join("framepress-evict-live-nodir");
        registry.sweep(&scratch);
        assert!(registry.get(&live).is_ok());
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_file_sweep_protects_live_downloads() {
        let dir = std::env::temp_dir().join(format!("framepress-sweep-{}", opaque_id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("orphan.mp4"), b"stale").unwrap();
        std::fs::write(dir.join("live.mp4"), b"partial").unwrap();

        let policy = SweepPolicy {
            retention: Duration::ZERO,
            ..SweepPolicy::default()
        };
        let registry = TaskRegistry::new(policy);
        let id = registry.create();
        registry.assign_output(&id, "live.mp4");
        registry.report_progress(&id, 30.0, "downloading");

        std::thread::sleep(Duration::from_millis(20));
        let report = registry.sweep(&dir);

        assert_eq!(report.files_deleted, 1);
        assert!(!dir.join("orphan.mp4").exists());
        assert!(dir.join("live.mp4").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_completed_task_file_is_swept() {
        let dir = std::env::temp_dir().join(format!("framepress-sweep-done-{}", opaque_id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("done.mp4"), b"finished").unwrap();

        let policy = SweepPolicy {
            retention: Duration::ZERO,
            ..SweepPolicy::default()
        };
        let registry = TaskRegistry::new(policy);
        let id = registry.create();
        registry.assign_output(&id, "done.mp4");
        registry.complete(&id, result_fixture("done.mp4"));

        std::thread::sleep(Duration::from_millis(20));
        let report = registry.sweep(&dir);

        assert_eq!(report.files_deleted, 1);
        assert!(!dir.join("done.mp4").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
