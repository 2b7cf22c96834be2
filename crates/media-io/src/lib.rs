//! framepress Media I/O
//!
//! Subprocess adapters around the system media toolchain: ffprobe for
//! metadata, ffmpeg for single-frame decoding, yt-dlp for acquisition.
//! All three binaries are expected in PATH.

pub mod decode;
pub mod probe;
pub mod ytdlp;

pub use decode::FfmpegDecoder;
pub use probe::probe_metadata;
pub use ytdlp::YtDlpBackend;
