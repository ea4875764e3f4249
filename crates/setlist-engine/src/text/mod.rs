//! Text measurement and rasterization.
//!
//! The list renderer only needs two things from a text system: how wide a
//! string is at a given pixel size, and a way to put it into a
//! [`PixelBuffer`]. Both are expressed as traits so the view can be driven by
//! a real font ([`FontSystem`]) or by the deterministic [`FixedAdvanceText`].

mod fixed;
mod font_system;

pub use fixed::FixedAdvanceText;
pub use font_system::{FontId, FontLoadError, FontSystem};

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::raster::PixelBuffer;

/// Vertical metrics for one font at one pixel size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontMetrics {
    /// Distance from baseline to the top of the tallest glyph (positive).
    pub ascent: f32,
    /// Distance from baseline to the bottom of the lowest glyph (positive).
    pub descent: f32,
    pub line_height: f32,
}

pub trait TextMeasurer {
    /// Advance width of `text` laid out on a single line at `size` px.
    fn text_width(&self, text: &str, size: f32) -> f32;

    /// `None` when no font is available at all.
    fn metrics(&self, size: f32) -> Option<FontMetrics>;

    fn line_height(&self, size: f32) -> f32 {
        self.metrics(size).map_or(size * 1.2, |m| m.line_height)
    }
}

pub trait TextRasterizer: TextMeasurer {
    /// Draws a single line of text. `origin` is the top-left of the line box.
    fn draw_text(
        &mut self,
        target: &mut PixelBuffer,
        text: &str,
        size: f32,
        origin: Vec2,
        color: Color,
        clip: Rect,
    );
}
