//! Sample frames from a video and compose them into a practice sheet.

use std::path::PathBuf;

use framepress_layout::{compose, LayoutParams};
use framepress_media_io::FfmpegDecoder;
use framepress_media_model::{CropRect, VideoDecoder};
use framepress_sampler::sample;

#[allow(clippy::too_many_arguments)]
pub fn run(
    path: PathBuf,
    output: PathBuf,
    start_ms: u64,
    end_ms: Option<u64>,
    interval_ms: u64,
    crop: Option<String>,
    frames_per_page: usize,
    width_percent: u32,
    gap: u32,
    title: Option<String>,
) -> anyhow::Result<()> {
    let decoder = FfmpegDecoder::open(&path)?;
    let metadata = *decoder.metadata();

    let crop = match crop {
        Some(spec) => parse_crop(&spec)?,
        None => CropRect {
            x1: 0,
            y1: 0,
            x2: metadata.width,
            y2: metadata.height,
        },
    };
    let end_ms = end_ms.unwrap_or(metadata.duration_ms);

    println!("Composing from: {}", path.display());
    println!("  Range: {start_ms}..{end_ms} ms, every {interval_ms} ms");
    println!(
        "  Crop: ({},{})..({},{})",
        crop.x1, crop.y1, crop.x2, crop.y2
    );

    let frames = sample(decoder, crop, start_ms, end_ms, interval_ms)?;
    println!("  Sampled {} frame(s)", frames.len());

    let params = LayoutParams {
        frames_per_page,
        width_percent,
        gap,
        title,
    };
    let images: Vec<_> = frames.into_iter().map(|f| f.image).collect();
    let pdf = compose(&images, &params)?;

    std::fs::write(&output, pdf)?;
    println!("Wrote: {}", output.display());
    Ok(())
}

/// Parse a crop rectangle from an `x1,y1,x2,y2` spec.
fn parse_crop(spec: &str) -> anyhow::Result<CropRect> {
    let parts: Vec<u32> = spec
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<Result<_, _>>()
        .map_err(|_| anyhow::anyhow!("Invalid crop spec: {spec}. Use: x1,y1,x2,y2"))?;
    if parts.len() != 4 {
        return Err(anyhow::anyhow!(
            "Invalid crop spec: {spec}. Use: x1,y1,x2,y2"
        ));
    }
    Ok(CropRect {
        x1: parts[0],
        y1: parts[1],
        x2: parts[2],
        y2: parts[3],
    })
}
