//! Acquisition worker: one per task.
//!
//! The backend call blocks on a subprocess, so it runs on the blocking pool;
//! the registry is the only channel back to the rest of the system.

use std::path::PathBuf;
use std::sync::Arc;

use framepress_common::opaque_id;
use framepress_media_model::{AcquisitionBackend, AcquisitionProgress, ProgressCallback};

use crate::registry::{TaskRegistry, TaskResult};

/// Drive one acquisition from start to a terminal state.
///
/// The destination file name is allocated and registered before the download
/// starts, so a concurrent sweep never deletes a file that is still being
/// written.
pub async fn run_acquisition(
    registry: Arc<TaskRegistry>,
    id: String,
    backend: Arc<dyn AcquisitionBackend>,
    downloads_dir: PathBuf,
    url: String,
) {
    let file_name = format!("{}.mp4", opaque_id());
    if let Err(e) = std::fs::create_dir_all(&downloads_dir) {
        registry.fail(&id, &format!("cannot create downloads dir: {e}"));
        return;
    }
    registry.assign_output(&id, &file_name);
    let dest = downloads_dir.join(&file_name);

    let progress: ProgressCallback = {
        let registry = Arc::clone(&registry);
        let id = id.clone();
        Box::new(move |p: AcquisitionProgress| {
            registry.report_progress(&id, p.percent, &p.message);
        })
    };

    tracing::info!(task_id = %id, url = %url, backend = backend.name(), "Starting acquisition");
    let handle = tokio::task::spawn_blocking({
        let dest = dest.clone();
        move || backend.acquire(&url, &dest, Some(progress))
    });

    match handle.await {
        Ok(Ok(video)) => {
            registry.complete(
                &id,
                TaskResult {
                    file_name,
                    title: video.title,
                    duration_ms: video.metadata.duration_ms,
                    width: video.metadata.width,
                    height: video.metadata.height,
                    fps: video.metadata.fps,
                },
            );
        }
        Ok(Err(e)) => {
            registry.fail(&id, &e.to_string());
        }
        Err(e) => {
            registry.fail(&id, &format!("acquisition worker panicked: {e}"));
        }
    }
}
