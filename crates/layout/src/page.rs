//! Page rasterization: title band, stacked frames, footer.

use image::{imageops, Rgb, RgbImage};

use crate::fonts::TitleFont;
use crate::geometry::{
    PageGeometry, FOOTER_FONT_PX, PAGE_HEIGHT, PAGE_MARGIN, PAGE_WIDTH, TITLE_FONT_PX,
};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
const FOOTER_GRAY: Rgb<u8> = Rgb([153, 153, 153]);

/// Render one page: a white canvas with the optional title centered in the
/// band, the group's frames stacked and centered, and a `page / total`
/// footer below the bottom margin.
///
/// `frames` must already be resized to the planned target dimensions.
pub(crate) fn render_page(
    geometry: &PageGeometry,
    frames: &[RgbImage],
    title: Option<&str>,
    font: &TitleFont,
    page_number: usize,
    total_pages: usize,
) -> RgbImage {
    let mut page = RgbImage::from_pixel(PAGE_WIDTH, PAGE_HEIGHT, WHITE);
    let mut y_offset = PAGE_MARGIN;

    if let Some(title) = title {
        let text_width = font.text_width(TITLE_FONT_PX, title);
        let x = (PAGE_WIDTH as i64 - text_width as i64) / 2;
        font.draw(
            &mut page,
            BLACK,
            x.max(0) as i32,
            y_offset as i32,
            TITLE_FONT_PX,
            title,
        );
        y_offset += geometry.title_band;
    }

    for frame in frames {
        let x = (PAGE_WIDTH as i64 - frame.width() as i64) / 2;
        imageops::overlay(&mut page, frame, x.max(0), y_offset as i64);
        y_offset += frame.height() + geometry.gap;
    }

    let footer = format!("{page_number} / {total_pages}");
    let text_width = font.text_width(FOOTER_FONT_PX, &footer);
    let x = (PAGE_WIDTH as i64 - text_width as i64) / 2;
    let y = PAGE_HEIGHT - PAGE_MARGIN + FOOTER_FONT_PX;
    font.draw(
        &mut page,
        FOOTER_GRAY,
        x.max(0) as i32,
        y as i32,
        FOOTER_FONT_PX,
        &footer,
    );

    page
}
