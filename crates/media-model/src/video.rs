//! Probed video metadata.

use serde::{Deserialize, Serialize};

/// Metadata derived from a local video file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Total duration in milliseconds.
    pub duration_ms: u64,

    /// Native frame width in pixels.
    pub width: u32,

    /// Native frame height in pixels.
    pub height: u32,

    /// Average frame rate.
    pub fps: f64,
}

/// The outcome of a successful acquisition: a display title plus the
/// metadata of the stored file. The destination file name is chosen by the
/// caller before the download starts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcquiredVideo {
    pub title: String,
    pub metadata: VideoMetadata,
}
