//! Title/footer text rendering with font fallback.
//!
//! System TrueType faces are probed in order; the first one that loads wins.
//! When none load (bare containers, stripped images), a built-in 5x7 bitmap
//! face guarantees that titles and page numbers still render.

use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

/// Candidate font paths, probed in order. Unicode-capable faces first.
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial Unicode.ttf",
    "/System/Library/Fonts/Helvetica.ttc",
    "/Windows/Fonts/malgun.ttf",
    "/Windows/Fonts/arial.ttf",
];

/// A text face resolved through the fallback chain.
pub enum TitleFont {
    Vector(FontVec),
    Builtin,
}

/// Probe the fallback chain and return the first usable face.
pub fn load_title_font() -> TitleFont {
    for path in FONT_PATHS.iter().copied() {
        if let Ok(data) = std::fs::read(path) {
            if let Ok(font) = FontVec::try_from_vec(data) {
                tracing::debug!(path, "Loaded title font");
                return TitleFont::Vector(font);
            }
        }
    }
    tracing::warn!("No system font available, falling back to built-in bitmap face");
    TitleFont::Builtin
}

impl TitleFont {
    /// Rendered width of `text` at the given pixel size.
    pub fn text_width(&self, px: u32, text: &str) -> u32 {
        match self {
            TitleFont::Vector(font) => {
                let (width, _) = text_size(PxScale::from(px as f32), font, text);
                width
            }
            TitleFont::Builtin => bitmap::text_width(px, text),
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    pub fn draw(
        &self,
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        y: i32,
        px: u32,
        text: &str,
    ) {
        match self {
            TitleFont::Vector(font) => {
                draw_text_mut(canvas, color, x, y, PxScale::from(px as f32), font, text);
            }
            TitleFont::Builtin => bitmap::draw(canvas, color, x, y, px, text),
        }
    }
}

/// Minimal 5x7 bitmap face: ASCII letters, digits, and the punctuation the
/// footer needs. Unknown characters render as a hollow box.
mod bitmap {
    use super::*;

    const GLYPH_COLS: u32 = 5;
    const GLYPH_ROWS: u32 = 7;

    fn cell_scale(px: u32) -> u32 {
        (px / (GLYPH_ROWS + 1)).max(1)
    }

    pub(super) fn text_width(px: u32, text: &str) -> u32 {
        let scale = cell_scale(px);
        let chars = text.chars().count() as u32;
        if chars == 0 {
            0
        } else {
            chars * (GLYPH_COLS + 1) * scale - scale
        }
    }

    pub(super) fn draw(
        canvas: &mut RgbImage,
        color: Rgb<u8>,
        x: i32,
        y: i32,
        px: u32,
        text: &str,
    ) {
        let scale = cell_scale(px) as i32;
        let mut pen_x = x;
        for c in text.chars() {
            let rows = glyph(c);
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_COLS as i32 {
                    if bits & (0x10 >> col) != 0 {
                        draw_filled_rect_mut(
                            canvas,
                            Rect::at(pen_x + col * scale, y + row as i32 * scale)
                                .of_size(scale as u32, scale as u32),
                            color,
                        );
                    }
                }
            }
            pen_x += (GLYPH_COLS as i32 + 1) * scale;
        }
    }

    fn glyph(c: char) -> [u8; 7] {
        match c.to_ascii_uppercase() {
            ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
            '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
            '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
            '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
            '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
            '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
            '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
            '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
            '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
            '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
            '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
            'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
            'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
            'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
            'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
            'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
            'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
            'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
            'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
            'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
            'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
            'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
            'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
            'N' => [0x11, 0x19, 0x15, 0x13, 0x11, 0x11, 0x11],
            'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
            'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
            'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
            'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
            'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
            'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
            'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
            'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x1B, 0x11],
            'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
            'Y' => [0x11, 0x11, 0x0A, 0x04, 0x04, 0x04, 0x04],
            'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
            '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
            '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
            '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
            ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
            ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
            '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
            '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
            '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
            ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
            '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
            _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_face_measures_and_draws() {
        let font = TitleFont::Builtin;
        let width = font.text_width(41, "3 / 4");
        assert!(width > 0);

        let mut canvas = RgbImage::from_pixel(400, 100, Rgb([255, 255, 255]));
        font.draw(&mut canvas, Rgb([0, 0, 0]), 10, 10, 41, "3 / 4");
        let inked = canvas.pixels().filter(|p| p.0 != [255, 255, 255]).count();
        assert!(inked > 0);
    }

    #[test]
    fn test_empty_text_has_zero_width() {
        assert_eq!(TitleFont::Builtin.text_width(66, ""), 0);
    }
}
