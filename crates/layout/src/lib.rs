//! framepress Layout Engine
//!
//! Lays a sequence of raster frames onto fixed-size A4 pages:
//! - **Geometry:** Width- vs height-constrained frame sizing, resolved so a
//!   page can never overflow vertically
//! - **Pages:** Title band, centered vertical stack, page-number footer
//! - **Document:** All pages serialized into one multi-page PDF
//!
//! Geometry and rendering are deterministic: identical frames and
//! parameters produce identical bytes.

pub mod fonts;
pub mod geometry;
mod page;
mod pdf;

use framepress_common::{FramepressError, FramepressResult};
use image::imageops::{self, FilterType};
use image::RgbImage;

pub use geometry::{plan_page, LayoutParams, PageGeometry, SizeConstraint};

/// Outcome of converting one client-supplied blob to the internal raster
/// format. Skips are recoverable; only an all-skip batch is fatal.
pub enum FrameConversion {
    Converted(RgbImage),
    Skipped { index: usize, reason: String },
}

/// Compose decoded frames into a multi-page PDF.
///
/// The first frame's aspect ratio drives the page geometry; every frame is
/// resized to the same target dimensions (stretching frames whose native
/// ratio differs), grouped into pages of `frames_per_page`, and stacked in
/// input order.
pub fn compose(frames: &[RgbImage], params: &LayoutParams) -> FramepressResult<Vec<u8>> {
    let first = frames
        .first()
        .ok_or_else(|| FramepressError::empty_input("no frames supplied"))?;
    let (first_width, first_height) = first.dimensions();
    let geometry = plan_page(first_width, first_height, params)?;

    tracing::info!(
        frames = frames.len(),
        frames_per_page = params.frames_per_page,
        frame_width = geometry.frame_width,
        frame_height = geometry.frame_height,
        constraint = ?geometry.constraint,
        "Planned page geometry"
    );

    let resized: Vec<RgbImage> = frames
        .iter()
        .map(|frame| {
            imageops::resize(
                frame,
                geometry.frame_width,
                geometry.frame_height,
                FilterType::Lanczos3,
            )
        })
        .collect();

    let font = fonts::load_title_font();
    let total_pages = resized.len().div_ceil(params.frames_per_page);
    let pages: Vec<RgbImage> = resized
        .chunks(params.frames_per_page)
        .enumerate()
        .map(|(index, group)| {
            page::render_page(
                &geometry,
                group,
                params.title.as_deref(),
                &font,
                index + 1,
                total_pages,
            )
        })
        .collect();

    tracing::info!(pages = pages.len(), "Rendered pages");
    pdf::write_document(&pages)
}

/// Compose directly from already-encoded frames (PNG, JPEG, ...).
///
/// Blobs that fail to decode are skipped with a warning; if every blob
/// fails, composition fails with an empty-input error.
pub fn compose_encoded(blobs: &[Vec<u8>], params: &LayoutParams) -> FramepressResult<Vec<u8>> {
    if blobs.is_empty() {
        return Err(FramepressError::empty_input("no frames supplied"));
    }

    let conversions: Vec<FrameConversion> = blobs
        .iter()
        .enumerate()
        .map(|(index, blob)| match image::load_from_memory(blob) {
            Ok(img) => FrameConversion::Converted(img.to_rgb8()),
            Err(e) => FrameConversion::Skipped {
                index,
                reason: e.to_string(),
            },
        })
        .collect();

    let mut frames = Vec::with_capacity(conversions.len());
    for conversion in conversions {
        match conversion {
            FrameConversion::Converted(frame) => frames.push(frame),
            FrameConversion::Skipped { index, reason } => {
                tracing::warn!(index, reason = %reason, "Skipping frame that failed to decode");
            }
        }
    }

    if frames.is_empty() {
        return Err(FramepressError::empty_input(format!(
            "all {} supplied frames failed to decode",
            blobs.len()
        )));
    }

    compose(&frames, params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_compose_empty_input_fails() {
        let err = compose(&[], &LayoutParams::default()).unwrap_err();
        assert!(matches!(err, FramepressError::EmptyInput { .. }));
    }

    #[test]
    fn test_compose_encoded_all_invalid_fails() {
        let blobs = vec![vec![0u8; 16], b"not an image".to_vec()];
        let err = compose_encoded(&blobs, &LayoutParams::default()).unwrap_err();
        assert!(matches!(err, FramepressError::EmptyInput { .. }));
    }

    #[test]
    fn test_compose_encoded_skips_bad_blobs() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(RgbImage::from_pixel(80, 40, Rgb([200, 10, 10])))
            .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let blobs = vec![b"garbage".to_vec(), png];
        let bytes = compose_encoded(&blobs, &LayoutParams::default()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
