//! End-to-end composition tests: frames in, parseable PDF out.

use framepress_layout::{compose, compose_encoded, plan_page, LayoutParams};
use image::{Rgb, RgbImage};
use lopdf::Document;
use proptest::prelude::*;

fn solid_frame(w: u32, h: u32, pixel: [u8; 3]) -> RgbImage {
    RgbImage::from_pixel(w, h, Rgb(pixel))
}

#[test]
fn test_ten_frames_three_per_page_yield_four_pages() {
    let frames: Vec<RgbImage> = (0..10)
        .map(|i| solid_frame(640, 360, [i * 20, 100, 50]))
        .collect();
    let params = LayoutParams {
        frames_per_page: 3,
        ..LayoutParams::default()
    };

    let bytes = compose(&frames, &params).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 4);
}

#[test]
fn test_single_frame_single_page() {
    let bytes = compose(
        &[solid_frame(1280, 720, [10, 10, 10])],
        &LayoutParams::default(),
    )
    .unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_composition_is_deterministic() {
    let frames: Vec<RgbImage> = (0..4)
        .map(|i| solid_frame(800, 450, [60 + i * 10, 30, 120]))
        .collect();
    let params = LayoutParams {
        frames_per_page: 2,
        title: Some("Warm-up Set".to_string()),
        ..LayoutParams::default()
    };

    let first = compose(&frames, &params).unwrap();
    let second = compose(&frames, &params).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_title_survives_across_pages() {
    let frames: Vec<RgbImage> = (0..4).map(|_| solid_frame(640, 360, [0, 0, 0])).collect();
    let params = LayoutParams {
        frames_per_page: 2,
        title: Some("Etude No. 3".to_string()),
        ..LayoutParams::default()
    };

    let bytes = compose(&frames, &params).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    assert_eq!(doc.get_pages().len(), 2);
}

#[test]
fn test_compose_encoded_mixed_blobs() {
    let mut png = Vec::new();
    image::DynamicImage::ImageRgb8(solid_frame(320, 180, [255, 0, 0]))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let blobs = vec![png.clone(), b"corrupt".to_vec(), png];
    let bytes = compose_encoded(&blobs, &LayoutParams::default()).unwrap();
    let doc = Document::load_mem(&bytes).unwrap();
    // The corrupt blob is skipped; two frames at one per page.
    assert_eq!(doc.get_pages().len(), 2);
}

proptest! {
    /// Geometry planning never panics, and any accepted plan fits the page.
    #[test]
    fn prop_planned_geometry_fits_page(
        width in 1u32..4096,
        height in 1u32..4096,
        frames_per_page in 1usize..12,
        width_percent in 1u32..=100,
        gap in 0u32..60,
    ) {
        let params = LayoutParams { frames_per_page, width_percent, gap, title: None };
        if let Ok(geo) = plan_page(width, height, &params) {
            prop_assert!(geo.frame_width >= 1);
            prop_assert!(geo.frame_height >= 1);
            prop_assert!(geo.stacked_height() <= geo.available_height() as u64);
        }
    }
}
