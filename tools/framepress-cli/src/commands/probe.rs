//! Show video stream metadata.

use std::path::PathBuf;

use framepress_media_io::probe_metadata;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let metadata = probe_metadata(&path)?;
    let report = serde_json::json!({
        "path": path,
        "width": metadata.width,
        "height": metadata.height,
        "fps": metadata.fps,
        "duration_ms": metadata.duration_ms,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
