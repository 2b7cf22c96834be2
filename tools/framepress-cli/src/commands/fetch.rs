//! Download a video via yt-dlp, reporting progress until it finishes.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use framepress_common::config::AppConfig;
use framepress_media_io::YtDlpBackend;
use framepress_media_model::AcquisitionBackend;
use framepress_tracker::{run_acquisition, SweepPolicy, TaskRegistry, TaskStatus};

pub async fn run(url: String, output: Option<PathBuf>) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let downloads_dir = output.unwrap_or(config.downloads_dir);

    let backend = YtDlpBackend::new();
    if !backend.is_available() {
        return Err(anyhow::anyhow!("yt-dlp not found in PATH"));
    }

    let registry = Arc::new(TaskRegistry::new(SweepPolicy {
        retention: Duration::from_secs(config.sweep.retention_secs),
        max_tracked: config.sweep.max_tracked_tasks,
    }));

    // Reclaim leftovers from previous runs before adding a new download.
    let report = registry.sweep(&downloads_dir);
    if report.files_deleted > 0 {
        println!("Swept {} expired download(s)", report.files_deleted);
    }

    let id = registry.create();
    println!("Fetching: {url}");
    println!("  Task: {id}");

    let worker = tokio::spawn(run_acquisition(
        Arc::clone(&registry),
        id.clone(),
        Arc::new(backend),
        downloads_dir.clone(),
        url,
    ));

    loop {
        let snapshot = registry.get(&id)?;
        match snapshot.status {
            TaskStatus::Pending | TaskStatus::Downloading => {
                print!("{}", progress_line(snapshot.progress));
                // Flush so the carriage-return line shows mid-download.
                std::io::stdout().flush().ok();
            }
            TaskStatus::Completed => {
                let result = snapshot
                    .result
                    .ok_or_else(|| anyhow::anyhow!("completed task has no result"))?;
                println!("\nDone: {}", downloads_dir.join(&result.file_name).display());
                println!("  Title: {}", result.title);
                println!("  Resolution: {}x{}", result.width, result.height);
                println!(
                    "  Duration: {:.1}s @ {:.2} fps",
                    result.duration_ms as f64 / 1000.0,
                    result.fps
                );
                break;
            }
            TaskStatus::Error => {
                let error = snapshot.error.unwrap_or_else(|| "unknown error".to_string());
                worker.await.ok();
                return Err(anyhow::anyhow!("download failed: {error}"));
            }
        }
        tokio::time::sleep(Duration::from_millis(500)).await;
    }

    worker.await.ok();
    Ok(())
}

/// One in-place progress line; starts with a carriage return so each poll
/// overwrites the previous one.
fn progress_line(percent: f64) -> String {
    format!("\r  Progress: {percent:.1}%  ")
}
