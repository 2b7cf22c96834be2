//! Stream metadata via ffprobe.

use std::path::Path;
use std::process::Command;

use framepress_common::{FramepressError, FramepressResult};
use framepress_media_model::VideoMetadata;

/// Probe the first video stream of `path` with ffprobe.
pub fn probe_metadata(path: &Path) -> FramepressResult<VideoMetadata> {
    let output = Command::new("ffprobe")
        .args([
            "-v",
            "error",
            "-select_streams",
            "v:0",
            "-show_entries",
            "stream=width,height,avg_frame_rate",
            "-show_entries",
            "format=duration",
            "-of",
            "json",
        ])
        .arg(path)
        .output()
        .map_err(|e| FramepressError::decode(format!("Failed to start ffprobe: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(FramepressError::decode(format!(
            "ffprobe failed (status {}): {}",
            output.status,
            stderr.trim()
        )));
    }

    parse_probe_output(&output.stdout, path)
}

fn parse_probe_output(stdout: &[u8], path: &Path) -> FramepressResult<VideoMetadata> {
    let value: serde_json::Value = serde_json::from_slice(stdout)?;

    let stream = value["streams"]
        .get(0)
        .ok_or_else(|| FramepressError::decode(format!("no video stream in {}", path.display())))?;

    let width = stream["width"].as_u64().unwrap_or(0) as u32;
    let height = stream["height"].as_u64().unwrap_or(0) as u32;
    if width == 0 || height == 0 {
        return Err(FramepressError::decode(format!(
            "ffprobe reported degenerate dimensions for {}",
            path.display()
        )));
    }

    let fps = stream["avg_frame_rate"]
        .as_str()
        .and_then(parse_frame_rate)
        .unwrap_or(0.0);

    let duration_ms = value["format"]["duration"]
        .as_str()
        .and_then(|s| s.parse::<f64>().ok())
        .map(|secs| (secs * 1000.0) as u64)
        .unwrap_or(0);

    Ok(VideoMetadata {
        duration_ms,
        width,
        height,
        fps,
    })
}

/// Parse ffprobe's rational frame rate ("30000/1001", "25/1").
fn parse_frame_rate(raw: &str) -> Option<f64> {
    let (num, den) = raw.split_once('/')?;
    let num = num.trim().parse::<f64>().ok()?;
    let den = den.trim().parse::<f64>().ok()?;
    if den == 0.0 {
        return None;
    }
    Some(num / den)
}
