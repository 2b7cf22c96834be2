//! Compose a practice sheet directly from image files.

use std::path::PathBuf;

use framepress_layout::{compose_encoded, LayoutParams};

pub fn run(
    files: Vec<PathBuf>,
    output: PathBuf,
    frames_per_page: usize,
    width_percent: u32,
    gap: u32,
    title: Option<String>,
) -> anyhow::Result<()> {
    if files.is_empty() {
        return Err(anyhow::anyhow!("no image files given"));
    }

    let mut blobs = Vec::with_capacity(files.len());
    for file in &files {
        blobs.push(std::fs::read(file)?);
    }
    println!("Composing {} image(s)", blobs.len());

    let params = LayoutParams {
        frames_per_page,
        width_percent,
        gap,
        title,
    };
    let pdf = compose_encoded(&blobs, &params)?;

    std::fs::write(&output, pdf)?;
    println!("Wrote: {}", output.display());
    Ok(())
}
