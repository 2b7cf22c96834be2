//! Boundary traits for external media collaborators.
//!
//! The acquisition backend and the video decode primitive are simple I/O
//! wrappers around external tools. The rest of the system only sees these
//! traits; `framepress-media-io` provides the subprocess-backed
//! implementations, and tests substitute in-memory fakes.

use std::path::Path;

use framepress_common::FramepressResult;
use image::RgbImage;

use crate::video::{AcquiredVideo, VideoMetadata};

/// Incremental progress report emitted by an acquisition backend.
#[derive(Debug, Clone)]
pub struct AcquisitionProgress {
    /// Percentage in `[0, 100]`.
    pub percent: f64,

    /// Human-readable status line.
    pub message: String,
}

/// Progress callback for acquisition backends.
pub type ProgressCallback = Box<dyn Fn(AcquisitionProgress) + Send>;

/// Trait for video acquisition backends (yt-dlp, etc.).
pub trait AcquisitionBackend: Send + Sync {
    /// Fetch the video at `url` into `dest`, reporting progress along the
    /// way. Returns the display title and the probed metadata of the stored
    /// file. Failure surfaces as a single descriptive error.
    fn acquire(
        &self,
        url: &str,
        dest: &Path,
        progress: Option<ProgressCallback>,
    ) -> FramepressResult<AcquiredVideo>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    /// Backend name.
    fn name(&self) -> &str;
}

/// Trait for the video decode primitive: open a local file, report its
/// metadata, and decode single frames at absolute timestamps.
pub trait VideoDecoder {
    /// Metadata probed when the video was opened.
    fn metadata(&self) -> &VideoMetadata;

    /// Seek to `timestamp_ms` and decode one frame.
    ///
    /// Returns `None` when no frame can be produced at that timestamp
    /// (end-of-stream rounding, corrupt packets). Such misses are expected
    /// and recoverable; callers skip them.
    fn decode_frame_at(&mut self, timestamp_ms: u64) -> Option<RgbImage>;
}
