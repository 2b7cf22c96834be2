//! Error types shared across framepress crates.

/// Top-level error type for framepress operations.
#[derive(Debug, thiserror::Error)]
pub enum FramepressError {
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error(
        "Crop coordinates out of bounds. Video size: {video_width}x{video_height}, \
         Crop: ({x1},{y1}) to ({x2},{y2})"
    )]
    InvalidCrop {
        video_width: u32,
        video_height: u32,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
    },

    #[error("No frames were extracted. Check your time range and crop coordinates.")]
    NoFramesExtracted,

    #[error("No valid frames to compose: {message}")]
    EmptyInput { message: String },

    #[error("Acquisition error: {message}")]
    Acquisition { message: String },

    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using FramepressError.
pub type FramepressResult<T> = Result<T, FramepressError>;

impl FramepressError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound {
            message: msg.into(),
        }
    }

    pub fn empty_input(msg: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: msg.into(),
        }
    }

    pub fn acquisition(msg: impl Into<String>) -> Self {
        Self::Acquisition {
            message: msg.into(),
        }
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }
}
