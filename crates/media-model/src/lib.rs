//! framepress Media Model
//!
//! Defines the core data contracts for framepress:
//! - **Crop:** Pixel-space crop rectangles and their validation rules
//! - **Video:** Probed video metadata (duration, dimensions, frame rate)
//! - **Ports:** Boundary traits for the acquisition backend and the video
//!   decode primitive, implemented by `framepress-media-io`
//!
//! All coordinates are absolute pixels in the source video's frame.

pub mod crop;
pub mod ports;
pub mod video;

pub use crop::*;
pub use ports::*;
pub use video::*;
