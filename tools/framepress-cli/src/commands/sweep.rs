//! Delete expired files from the downloads directory.

use std::time::Duration;

use framepress_common::config::AppConfig;
use framepress_tracker::{SweepPolicy, TaskRegistry};

pub fn run(retention_secs: Option<u64>) -> anyhow::Result<()> {
    let config = AppConfig::load();
    let retention = retention_secs.unwrap_or(config.sweep.retention_secs);

    let registry = TaskRegistry::new(SweepPolicy {
        retention: Duration::from_secs(retention),
        max_tracked: config.sweep.max_tracked_tasks,
    });

    println!("Sweeping: {}", config.downloads_dir.display());
    println!("  Retention: {retention}s");

    let report = registry.sweep(&config.downloads_dir);
    println!("Deleted {} file(s)", report.files_deleted);
    Ok(())
}
