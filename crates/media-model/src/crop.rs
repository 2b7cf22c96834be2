//! Crop rectangle type and validation.

use framepress_common::{FramepressError, FramepressResult};
use serde::{Deserialize, Serialize};

/// A crop rectangle in absolute pixel coordinates.
///
/// `(x1, y1)` is the top-left corner, `(x2, y2)` the exclusive bottom-right
/// corner. A valid rectangle satisfies `x1 < x2` and `y1 < y2` and lies
/// entirely within the source frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl CropRect {
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Crop width. Zero for degenerate rectangles.
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    /// Crop height. Zero for degenerate rectangles.
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// Validate the rectangle against the source frame dimensions.
    ///
    /// Fails if the rectangle is degenerate or exceeds the frame bounds.
    pub fn validate_within(&self, frame_width: u32, frame_height: u32) -> FramepressResult<()> {
        if self.x1 >= self.x2
            || self.y1 >= self.y2
            || self.x2 > frame_width
            || self.y2 > frame_height
        {
            return Err(FramepressError::InvalidCrop {
                video_width: frame_width,
                video_height: frame_height,
                x1: self.x1,
                y1: self.y1,
                x2: self.x2,
                y2: self.y2,
            });
        }
        Ok(())
    }
}
