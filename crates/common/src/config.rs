//! Application configuration.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Global application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory where acquired videos are stored.
    pub downloads_dir: PathBuf,

    /// Sweep policy defaults.
    pub sweep: SweepDefaults,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Default sweep parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepDefaults {
    /// Seconds an output file may sit in the downloads dir before eviction.
    pub retention_secs: u64,

    /// Maximum number of tasks kept in the registry before terminal entries
    /// are evicted.
    pub max_tracked_tasks: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "framepress=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            downloads_dir: dirs_default_downloads(),
            sweep: SweepDefaults::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for SweepDefaults {
    fn default() -> Self {
        Self {
            retention_secs: 3600,
            max_tracked_tasks: 100,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl AppConfig {
    /// Load config from the standard location, falling back to defaults.
    ///
    /// The downloads directory is created eagerly so the first fetch and
    /// the sweep never race over its existence.
    pub fn load() -> Self {
        let config = Self::load_from(&config_file_path());
        config.ensure_downloads_dir();
        config
    }

    fn load_from(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => return config,
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "Config file is malformed, using defaults"
                    );
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Config file is unreadable, using defaults"
                );
            }
        }
        Self::default()
    }

    /// Create the downloads directory if it is missing.
    pub fn ensure_downloads_dir(&self) {
        if let Err(e) = std::fs::create_dir_all(&self.downloads_dir) {
            tracing::warn!(
                dir = %self.downloads_dir.display(),
                error = %e,
                "Cannot create downloads directory"
            );
        }
    }

    /// Save config to the standard location.
    pub fn save(&self) -> Result<(), std::io::Error> {
        let config_path = config_file_path();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        std::fs::write(config_path, json)
    }
}

/// Standard config file location.
fn config_file_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("framepress").join("config.json")
}

/// Default downloads directory.
fn dirs_default_downloads() -> PathBuf {
    let base = std::env::var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
            PathBuf::from(home).join(".local").join("share")
        });
    base.join("framepress").join("downloads")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::opaque_id;

    #[test]
    fn test_missing_config_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("framepress-cfg-{}.json", opaque_id()));
        let config = AppConfig::load_from(&path);
        assert_eq!(config.sweep.retention_secs, 3600);
        assert_eq!(config.sweep.max_tracked_tasks, 100);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let path = std::env::temp_dir().join(format!("framepress-cfg-{}.json", opaque_id()));
        std::fs::write(
            &path,
            r#"{
                "downloads_dir": "/tmp/framepress-test-downloads",
                "sweep": { "retention_secs": 60, "max_tracked_tasks": 5 },
                "logging": { "level": "debug", "json": true, "file": null }
            }"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.sweep.retention_secs, 60);
        assert_eq!(config.sweep.max_tracked_tasks, 5);
        assert!(config.logging.json);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_malformed_config_falls_back_to_defaults() {
        let path = std::env::temp_dir().join(format!("framepress-cfg-{}.json", opaque_id()));
        std::fs::write(&path, "{ not json").unwrap();

        let config = AppConfig::load_from(&path);
        assert_eq!(config.sweep.retention_secs, 3600);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_ensure_downloads_dir_creates_missing_dir() {
        let dir = std::env::temp_dir()
            .join(format!("framepress-dl-{}", opaque_id()))
            .join("downloads");
        let config = AppConfig {
            downloads_dir: dir.clone(),
            ..AppConfig::default()
        };

        config.ensure_downloads_dir();
        assert!(dir.is_dir());

        std::fs::remove_dir_all(dir.parent().unwrap()).unwrap();
    }
}
