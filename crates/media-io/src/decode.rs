//! Single-frame decoding via ffmpeg.
//!
//! Seeking with `-ss` before the input keeps extraction fast on long videos;
//! one ffmpeg invocation per requested timestamp means no decoder state to
//! clean up, however the sampling run ends.

use std::path::{Path, PathBuf};
use std::process::Command;

use image::RgbImage;

use framepress_common::{FramepressError, FramepressResult};
use framepress_media_model::{VideoDecoder, VideoMetadata};

use crate::probe::probe_metadata;

/// Frame decoder backed by the system ffmpeg binary.
pub struct FfmpegDecoder {
    path: PathBuf,
    metadata: VideoMetadata,
}

impl FfmpegDecoder {
    /// Open a video file and probe its metadata.
    pub fn open(path: &Path) -> FramepressResult<Self> {
        if !path.exists() {
            return Err(FramepressError::not_found(format!(
                "video file {} does not exist",
                path.display()
            )));
        }
        let metadata = probe_metadata(path)?;
        tracing::debug!(
            path = %path.display(),
            width = metadata.width,
            height = metadata.height,
            duration_ms = metadata.duration_ms,
            "Opened video"
        );
        Ok(Self {
            path: path.to_path_buf(),
            metadata,
        })
    }
}

impl VideoDecoder for FfmpegDecoder {
    fn metadata(&self) -> &VideoMetadata {
        &self.metadata
    }

    fn decode_frame_at(&mut self, timestamp_ms: u64) -> Option<RgbImage> {
        let seek = format!("{:.3}", timestamp_ms as f64 / 1000.0);
        let output = Command::new("ffmpeg")
            .args(["-v", "error", "-ss"])
            .arg(seek)
            .arg("-i")
            .arg(&self.path)
            .args(["-frames:v", "1", "-f", "image2pipe", "-vcodec", "png", "-"])
            .output()
            .ok()?;

        if !output.status.success() || output.stdout.is_empty() {
            tracing::debug!(timestamp_ms, "No frame decoded at timestamp");
            return None;
        }

        match image::load_from_memory(&output.stdout) {
            Ok(img) => Some(img.to_rgb8()),
            Err(e) => {
                tracing::debug!(timestamp_ms, error = %e, "Decoded frame failed to parse");
                None
            }
        }
    }
}
