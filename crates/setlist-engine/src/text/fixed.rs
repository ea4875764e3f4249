use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::raster::PixelBuffer;

use super::{FontMetrics, TextMeasurer, TextRasterizer};

/// Monospace stand-in for a real font.
///
/// Every char advances by `advance_ratio * size`; drawing paints one solid
/// box per non-whitespace char. Used by tests and as the fallback when no
/// system font can be found.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedAdvanceText {
    pub advance_ratio: f32,
}

impl FixedAdvanceText {
    pub const fn new(advance_ratio: f32) -> Self {
        Self { advance_ratio }
    }
}

impl Default for FixedAdvanceText {
    fn default() -> Self {
        Self::new(0.5)
    }
}

impl TextMeasurer for FixedAdvanceText {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * self.advance_ratio
    }

    fn metrics(&self, size: f32) -> Option<FontMetrics> {
        Some(FontMetrics {
            ascent: size * 0.8,
            descent: size * 0.2,
            line_height: size * 1.2,
        })
    }
}

impl TextRasterizer for FixedAdvanceText {
    fn draw_text(
        &mut self,
        target: &mut PixelBuffer,
        text: &str,
        size: f32,
        origin: Vec2,
        color: Color,
        clip: Rect,
    ) {
        let advance = size * self.advance_ratio;
        let glyph_w = (advance - 1.0).max(1.0);
        let top = origin.y + size * 0.2;
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x = origin.x + i as f32 * advance;
            target.fill_rect(Rect::new(x, top, glyph_w, size * 0.8), color, clip);
        }
    }
}
