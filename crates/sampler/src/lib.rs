//! framepress Frame Sampler
//!
//! Walks a video at a fixed interval and collects cropped frames:
//! - Crop coordinates are validated against the probed dimensions before
//!   any decoding happens
//! - Timestamps run over the half-open range `[start, end)`
//! - A decode miss at one timestamp is skipped, not fatal
//! - An empty result is the only fatal condition
//!
//! Decoding itself is behind the [`VideoDecoder`] port; this crate holds no
//! I/O of its own.

use framepress_common::{FramepressError, FramepressResult};
use framepress_media_model::{CropRect, VideoDecoder};
use image::RgbImage;

/// One sampled frame. Its index is its position in the returned sequence.
#[derive(Debug, Clone)]
pub struct SampledFrame {
    /// Source timestamp this frame was decoded at.
    pub timestamp_ms: u64,

    /// The cropped raster image.
    pub image: RgbImage,
}

/// Sample cropped frames from `decoder` at every `interval_ms` over
/// `[start_ms, end_ms)`.
///
/// The decoder is consumed so the underlying video resource is released on
/// every exit path.
pub fn sample<D: VideoDecoder>(
    mut decoder: D,
    crop: CropRect,
    start_ms: u64,
    end_ms: u64,
    interval_ms: u64,
) -> FramepressResult<Vec<SampledFrame>> {
    if interval_ms == 0 {
        return Err(FramepressError::invalid_input(
            "sampling interval must be positive",
        ));
    }

    let meta = *decoder.metadata();
    crop.validate_within(meta.width, meta.height)?;

    tracing::debug!(
        start_ms,
        end_ms,
        interval_ms,
        video_width = meta.width,
        video_height = meta.height,
        "Sampling frames"
    );

    let mut frames = Vec::new();
    let mut timestamp = start_ms;
    while timestamp < end_ms {
        match decoder.decode_frame_at(timestamp) {
            Some(image) => {
                if let Some(cropped) = crop_frame(&image, crop, timestamp) {
                    frames.push(SampledFrame {
                        timestamp_ms: timestamp,
                        image: cropped,
                    });
                }
            }
            None => {
                tracing::debug!(timestamp_ms = timestamp, "Decode miss, skipping timestamp");
            }
        }

        timestamp = match timestamp.checked_add(interval_ms) {
            Some(next) => next,
            None => break,
        };
    }

    if frames.is_empty() {
        return Err(FramepressError::NoFramesExtracted);
    }

    tracing::info!(frames = frames.len(), "Sampling complete");
    Ok(frames)
}

/// Apply the crop to one decoded frame.
///
/// The decoded frame can be smaller than the probe reported (decoder
/// rounding); the rectangle is clamped to the actual dimensions, and a
/// zero-area result is dropped with a warning.
fn crop_frame(image: &RgbImage, crop: CropRect, timestamp_ms: u64) -> Option<RgbImage> {
    let (img_w, img_h) = image.dimensions();
    let x = crop.x1.min(img_w);
    let y = crop.y1.min(img_h);
    let w = crop.x2.min(img_w).saturating_sub(x);
    let h = crop.y2.min(img_h).saturating_sub(y);

    if w == 0 || h == 0 {
        tracing::warn!(timestamp_ms, "Empty crop, skipping frame");
        return None;
    }

    Some(image::imageops::crop_imm(image, x, y, w, h).to_image())
}

#[cfg(test)]
mod tests {
    use super::*;
    use framepress_media_model::VideoMetadata;
    use std::collections::HashSet;

    struct FakeDecoder {
        metadata: VideoMetadata,
        frame_width: u32,
        frame_height: u32,
        misses: HashSet<u64>,
    }

    impl FakeDecoder {
        fn new(width: u32, height: u32) -> Self {
            Self {
                metadata: VideoMetadata {
                    duration_ms: 60_000,
                    width,
                    height,
                    fps: 30.0,
                },
                frame_width: width,
                frame_height: height,
                misses: HashSet::new(),
            }
        }

        fn with_misses(mut self, misses: impl IntoIterator<Item = u64>) -> Self {
            self.misses = misses.into_iter().collect();
            self
        }

        /// Decoded frames smaller than the probed dimensions.
        fn with_short_frames(mut self, width: u32, height: u32) -> Self {
            self.frame_width = width;
            self.frame_height = height;
            self
        }
    }

    impl VideoDecoder for FakeDecoder {
        fn metadata(&self) -> &VideoMetadata {
            &self.metadata
        }

        fn decode_frame_at(&mut self, timestamp_ms: u64) -> Option<RgbImage> {
            if self.misses.contains(&timestamp_ms) {
                return None;
            }
            Some(RgbImage::from_pixel(
                self.frame_width,
                self.frame_height,
                image::Rgb([10, 20, 30]),
            ))
        }
    }

    #[test]
    fn test_sample_count_matches_interval_grid() {
        let decoder = FakeDecoder::new(800, 400);
        let crop = CropRect::new(0, 0, 800, 400);
        // ceil((10000 - 1000) / 2500) = 4 timestamps: 1000, 3500, 6000, 8500
        let frames = sample(decoder, crop, 1000, 10_000, 2500).unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].timestamp_ms, 1000);
        assert_eq!(frames[3].timestamp_ms, 8500);
    }

    #[test]
    fn test_end_is_exclusive() {
        let decoder = FakeDecoder::new(800, 400);
        let crop = CropRect::new(0, 0, 800, 400);
        // 0, 1000, 2000 — 3000 itself is excluded
        let frames = sample(decoder, crop, 0, 3000, 1000).unwrap();
        assert_eq!(frames.len(), 3);
    }

    #[test]
    fn test_decode_misses_are_skipped() {
        let decoder = FakeDecoder::new(800, 400).with_misses([3500, 8500]);
        let crop = CropRect::new(100, 50, 700, 350);
        let frames = sample(decoder, crop, 1000, 10_000, 2500).unwrap();
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[0].timestamp_ms, 1000);
        assert_eq!(frames[1].timestamp_ms, 6000);
        assert_eq!(frames[0].image.dimensions(), (600, 300));
    }

    #[test]
    fn test_all_misses_is_fatal() {
        let decoder = FakeDecoder::new(800, 400).with_misses([0, 1000, 2000]);
        let crop = CropRect::new(0, 0, 800, 400);
        let err = sample(decoder, crop, 0, 3000, 1000).unwrap_err();
        assert!(matches!(err, FramepressError::NoFramesExtracted));
    }

    #[test]
    fn test_empty_range_is_fatal() {
        let decoder = FakeDecoder::new(800, 400);
        let crop = CropRect::new(0, 0, 800, 400);
        let err = sample(decoder, crop, 5000, 5000, 1000).unwrap_err();
        assert!(matches!(err, FramepressError::NoFramesExtracted));
    }

    #[test]
    fn test_invalid_crop_fails_before_decoding() {
        let decoder = FakeDecoder::new(800, 400).with_misses([0, 1000, 2000]);
        let crop = CropRect::new(400, 0, 400, 400);
        let err = sample(decoder, crop, 0, 3000, 1000).unwrap_err();
        assert!(matches!(err, FramepressError::InvalidCrop { .. }));

        let decoder = FakeDecoder::new(800, 400);
        let crop = CropRect::new(0, 0, 900, 400);
        let err = sample(decoder, crop, 0, 3000, 1000).unwrap_err();
        assert!(matches!(err, FramepressError::InvalidCrop { .. }));
    }

    #[test]
    fn test_zero_interval_rejected() {
        let decoder = FakeDecoder::new(800, 400);
        let crop = CropRect::new(0, 0, 800, 400);
        let err = sample(decoder, crop, 0, 3000, 0).unwrap_err();
        assert!(matches!(err, FramepressError::InvalidInput { .. }));
    }

    #[test]
    fn test_short_decoded_frame_is_clamped() {
        // Probe says 800x400 but decoded frames come back 640x400.
        let decoder = FakeDecoder::new(800, 400).with_short_frames(640, 400);
        let crop = CropRect::new(600, 0, 800, 400);
        let frames = sample(decoder, crop, 0, 1000, 500).unwrap();
        assert_eq!(frames[0].image.dimensions(), (40, 400));
    }

    #[test]
    fn test_fully_clipped_crop_is_fatal() {
        // Decoded frames end before the crop starts, every crop is empty.
        let decoder = FakeDecoder::new(800, 400).with_short_frames(500, 400);
        let crop = CropRect::new(600, 0, 800, 400);
        let err = sample(decoder, crop, 0, 1000, 500).unwrap_err();
        assert!(matches!(err, FramepressError::NoFramesExtracted));
    }
}
