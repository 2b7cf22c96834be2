//! Page geometry computation.
//!
//! Frames are sized under two competing constraints: the requested fraction
//! of the page width, and the vertical space left once every slot and gap
//! on the page is accounted for. Whichever candidate yields the smaller
//! stacked height wins, so a page can never overflow vertically.
//!
//! All pixel dimensions are derived with integer truncation at each step.
//! Rounding would drift the layout by a pixel here and there; truncation
//! keeps it reproducible.

use framepress_common::{FramepressError, FramepressResult};

/// Output resolution of the page canvas.
pub const DPI: u32 = 300;

/// Convert a 72-DPI point dimension to canvas pixels, truncating.
pub const fn pt_to_px(pt: u32) -> u32 {
    pt * DPI / 72
}

/// A4 page width in pixels (595 pt).
pub const PAGE_WIDTH: u32 = pt_to_px(595);

/// A4 page height in pixels (842 pt).
pub const PAGE_HEIGHT: u32 = pt_to_px(842);

/// Margin on all four page edges (40 pt).
pub const PAGE_MARGIN: u32 = pt_to_px(40);

/// Height of the title band reserved at the top when a title is set (30 pt).
pub const TITLE_BAND_HEIGHT: u32 = pt_to_px(30);

/// Title text size (16 pt).
pub const TITLE_FONT_PX: u32 = pt_to_px(16);

/// Page-number footer text size (10 pt).
pub const FOOTER_FONT_PX: u32 = pt_to_px(10);

/// Caller-supplied layout parameters.
#[derive(Debug, Clone)]
pub struct LayoutParams {
    /// Frames stacked on each page.
    pub frames_per_page: usize,

    /// Requested frame width as a percentage of the usable page width.
    pub width_percent: u32,

    /// Vertical gap between stacked frames, in 72-DPI points.
    pub gap: u32,

    /// Optional title drawn in a band at the top of every page.
    pub title: Option<String>,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self {
            frames_per_page: 1,
            width_percent: 95,
            gap: 10,
            title: None,
        }
    }
}

/// Which sizing constraint won.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeConstraint {
    /// Frames sized to the requested width fraction.
    Width,
    /// Frames shrunk to fit the available vertical space.
    Height,
}

/// Resolved geometry for one composition request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageGeometry {
    /// Target frame width in pixels.
    pub frame_width: u32,

    /// Target frame height in pixels.
    pub frame_height: u32,

    /// Frames per page.
    pub frames_per_page: usize,

    /// Inter-frame gap in canvas pixels.
    pub gap: u32,

    /// Title band height in canvas pixels (0 without a title).
    pub title_band: u32,

    /// Which constraint was chosen.
    pub constraint: SizeConstraint,
}

impl PageGeometry {
    /// Vertical space available for frames and gaps.
    pub fn available_height(&self) -> u32 {
        PAGE_HEIGHT - 2 * PAGE_MARGIN - self.title_band
    }

    /// Horizontal space available for frames.
    pub fn available_width(&self) -> u32 {
        PAGE_WIDTH - 2 * PAGE_MARGIN
    }

    /// Total stacked content height of a full page.
    pub fn stacked_height(&self) -> u64 {
        self.frame_height as u64 * self.frames_per_page as u64
            + self.gap as u64 * (self.frames_per_page as u64 - 1)
    }
}

/// Compute the page geometry from the first frame's dimensions.
///
/// The first frame's aspect ratio governs every frame on the page; frames
/// with a different native ratio are stretched to match downstream.
pub fn plan_page(
    first_width: u32,
    first_height: u32,
    params: &LayoutParams,
) -> FramepressResult<PageGeometry> {
    if first_width == 0 || first_height == 0 {
        return Err(FramepressError::invalid_input(
            "frame dimensions must be positive",
        ));
    }
    if params.frames_per_page == 0 {
        return Err(FramepressError::invalid_input(
            "frames_per_page must be at least 1",
        ));
    }
    if params.width_percent == 0 || params.width_percent > 100 {
        return Err(FramepressError::invalid_input(format!(
            "width_percent must be in 1..=100, got {}",
            params.width_percent
        )));
    }

    let title_band = if params.title.is_some() {
        TITLE_BAND_HEIGHT
    } else {
        0
    };
    let gap = pt_to_px_runtime(params.gap);

    let available_width = (PAGE_WIDTH - 2 * PAGE_MARGIN) as i64;
    let available_height = (PAGE_HEIGHT - 2 * PAGE_MARGIN - title_band) as i64;
    let slots = params.frames_per_page as i64;
    let aspect_ratio = first_height as f64 / first_width as f64;

    // Width-constrained candidate: the requested fraction of the usable width.
    let width_c_width = (available_width as f64 * (params.width_percent as f64 / 100.0)) as i64;
    let width_c_height = (width_c_width as f64 * aspect_ratio) as i64;

    // Height-constrained candidate: split the remaining height across slots.
    let slot_budget = available_height - gap as i64 * (slots - 1);
    let height_c_height = slot_budget / slots;
    if height_c_height < 1 {
        return Err(FramepressError::invalid_input(format!(
            "{} frames with a {} pt gap do not fit on one page",
            params.frames_per_page, params.gap
        )));
    }
    let height_c_width = (height_c_height as f64 / aspect_ratio) as i64;

    // The candidate with the smaller stacked height wins.
    let width_fits = width_c_height * slots + gap as i64 * (slots - 1) <= available_height;
    let (frame_width, frame_height, constraint) = if width_fits {
        (width_c_width, width_c_height, SizeConstraint::Width)
    } else {
        (height_c_width, height_c_height, SizeConstraint::Height)
    };

    Ok(PageGeometry {
        frame_width: frame_width.max(1) as u32,
        frame_height: frame_height.max(1) as u32,
        frames_per_page: params.frames_per_page,
        gap,
        title_band,
        constraint,
    })
}

/// Runtime equivalent of [`pt_to_px`] for caller-supplied values.
fn pt_to_px_runtime(pt: u32) -> u32 {
    (pt as u64 * DPI as u64 / 72) as u32
}
