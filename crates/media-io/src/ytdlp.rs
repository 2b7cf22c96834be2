//! Video acquisition via yt-dlp.

use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use std::process::{Command, Stdio};

use framepress_common::{FramepressError, FramepressResult};
use framepress_media_model::{
    AcquiredVideo, AcquisitionBackend, AcquisitionProgress, ProgressCallback,
};

use crate::probe::probe_metadata;

/// Acquisition backend wrapping the yt-dlp binary.
///
/// The title is fetched in a separate metadata-only pass; title extraction
/// failures never fail the download itself.
pub struct YtDlpBackend;

impl YtDlpBackend {
    pub fn new() -> Self {
        Self
    }

    fn fetch_title(&self, url: &str) -> String {
        let output = Command::new("yt-dlp")
            .args(["--print", "title", "--skip-download", "--no-warnings"])
            .arg(url)
            .output();

        match output {
            Ok(output) if output.status.success() => {
                let title = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if title.is_empty() {
                    "Unknown Title".to_string()
                } else {
                    title
                }
            }
            Ok(output) => {
                tracing::warn!(
                    status = %output.status,
                    "yt-dlp title extraction failed, using fallback"
                );
                "Unknown Title".to_string()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to run yt-dlp for title extraction");
                "Unknown Title".to_string()
            }
        }
    }

    fn run_download(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<&ProgressCallback>,
    ) -> FramepressResult<()> {
        let mut cmd = Command::new("yt-dlp");
        cmd.args(["-f", "best", "--merge-output-format", "mp4", "-o"])
            .arg(dest)
            .args(["--newline", "--no-warnings"])
            .arg(url)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let mut child = cmd
            .spawn()
            .map_err(|e| FramepressError::acquisition(format!("Failed to start yt-dlp: {e}")))?;

        tracing::info!(pid = child.id(), url, "yt-dlp process started");

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| FramepressError::acquisition("Failed to capture yt-dlp stdout"))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| FramepressError::acquisition("Failed to capture yt-dlp stderr"))?;

        // Drain stderr concurrently to avoid yt-dlp blocking on a full pipe.
        let stderr_task = std::thread::spawn(move || -> String {
            let mut reader = BufReader::new(stderr);
            let mut output = String::new();
            match reader.read_to_string(&mut output) {
                Ok(_) => output,
                Err(err) => format!("<failed to read yt-dlp stderr: {err}>"),
            }
        });

        let mut reader = BufReader::new(stdout);
        let mut line = String::new();
        loop {
            line.clear();
            let bytes = reader.read_line(&mut line).map_err(|e| {
                FramepressError::acquisition(format!("Failed reading yt-dlp progress: {e}"))
            })?;
            if bytes == 0 {
                break;
            }

            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if let Some(percent) = parse_progress_line(trimmed) {
                if let Some(cb) = progress {
                    cb(AcquisitionProgress {
                        percent,
                        message: trimmed.to_string(),
                    });
                }
            }
        }

        let status = child
            .wait()
            .map_err(|e| FramepressError::acquisition(format!("Failed to wait on yt-dlp: {e}")))?;

        let stderr_output = stderr_task
            .join()
            .unwrap_or_else(|_| "<failed to join stderr reader>".to_string());

        if !status.success() {
            return Err(FramepressError::acquisition(format!(
                "yt-dlp failed (status {}): {}",
                status,
                stderr_output.trim()
            )));
        }

        Ok(())
    }
}

impl Default for YtDlpBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AcquisitionBackend for YtDlpBackend {
    fn acquire(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressCallback>,
    ) -> FramepressResult<AcquiredVideo> {
        let title = self.fetch_title(url);
        self.run_download(url, dest, progress.as_ref())?;

        if !dest.exists() {
            return Err(FramepressError::acquisition(format!(
                "yt-dlp reported success but {} was not created",
                dest.display()
            )));
        }

        let metadata = probe_metadata(dest)?;
        tracing::info!(
            title = %title,
            duration_ms = metadata.duration_ms,
            width = metadata.width,
            height = metadata.height,
            "Acquisition finished"
        );
        Ok(AcquiredVideo { title, metadata })
    }

    fn is_available(&self) -> bool {
        Command::new("yt-dlp")
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map(|status| status.success())
            .unwrap_or(false)
    }

    fn name(&self) -> &str {
        "yt-dlp"
    }
}

/// Extract the percentage from a `[download]  42.3% of ...` progress line.
fn parse_progress_line(line: &str) -> Option<f64> {
    let rest = line.strip_prefix("[download]")?.trim_start();
    let percent_str = rest.split('%').next()?.trim();
    percent_str.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_progress_line() {
        assert_eq!(
            parse_progress_line("[download]  42.3% of 10.00MiB at 1.2MiB/s"),
            Some(42.3)
        );
        assert_eq!(
            parse_progress_line("[download] 100% of 10.00MiB in 00:08"),
            Some(100.0)
        );
        assert_eq!(parse_progress_line("[download] Destination: out.mp4"), None);
        assert_eq!(parse_progress_line("[info] extracting URL"), None);
        assert_eq!(parse_progress_line("plain noise"), None);
    }
}
