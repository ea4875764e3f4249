use std::collections::HashMap;
use std::fmt;

use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};
use fontdue::Metrics;

use crate::coords::{Rect, Vec2};
use crate::paint::Color;
use crate::raster::PixelBuffer;

use super::{FontMetrics, TextMeasurer, TextRasterizer};

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

/// Owns a collection of loaded fonts plus a CPU glyph cache.
///
/// The first loaded font is the default face used by the [`TextMeasurer`] and
/// [`TextRasterizer`] impls. With no font loaded, measurement falls back to a
/// rough `0.5 * size` advance and drawing is a no-op; callers never have to
/// special-case a missing font.
///
/// Glyph bitmaps are keyed by `fontdue::layout::GlyphRasterConfig` (font
/// identity, glyph index, pixel size), so a glyph used across many rows is
/// rasterized only once.
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
    glyph_cache: HashMap<GlyphRasterConfig, (Metrics, Vec<u8>)>,
    layout: Layout<()>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self {
            fonts: Vec::new(),
            glyph_cache: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        log::debug!("loaded font {:?} ({} glyphs)", id, self.fonts[id.0].glyph_count());
        Ok(id)
    }

    pub fn has_font(&self) -> bool {
        !self.fonts.is_empty()
    }

    /// Number of distinct glyph bitmaps rasterized so far.
    pub fn cached_glyphs(&self) -> usize {
        self.glyph_cache.len()
    }

    pub(crate) fn get(&self, id: FontId) -> Option<&fontdue::Font> {
        self.fonts.get(id.0)
    }

    fn default_font(&self) -> Option<&fontdue::Font> {
        self.get(FontId(0))
    }
}

impl Default for FontSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeasurer for FontSystem {
    fn text_width(&self, text: &str, size: f32) -> f32 {
        let Some(font) = self.default_font() else {
            return text.chars().count() as f32 * size * 0.5;
        };
        if text.is_empty() || size <= 0.0 {
            return 0.0;
        }

        // Sum of advances, not bitmap extents: the renderer positions glyphs
        // by pen advance, so the measured width must agree with it.
        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings::default());
        layout.append(&[font], &TextStyle::new(text, size, 0));
        layout
            .glyphs()
            .iter()
            .map(|g| {
                let m = font.metrics_indexed(g.key.glyph_index, size);
                (g.x - m.xmin as f32 + m.advance_width).max(0.0)
            })
            .fold(0.0f32, f32::max)
    }

    fn metrics(&self, size: f32) -> Option<FontMetrics> {
        let lm = self.default_font()?.horizontal_line_metrics(size)?;
        Some(FontMetrics {
            ascent: lm.ascent,
            descent: -lm.descent,
            line_height: lm.new_line_size,
        })
    }
}

impl TextRasterizer for FontSystem {
    fn draw_text(
        &mut self,
        target: &mut PixelBuffer,
        text: &str,
        size: f32,
        origin: Vec2,
        color: Color,
        clip: Rect,
    ) {
        if text.is_empty() || size <= 0.0 {
            return;
        }
        let Some(font) = self.fonts.first() else { return };

        self.layout.reset(&LayoutSettings {
            x: origin.x,
            y: origin.y,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(text, size, 0));

        for g in self.layout.glyphs() {
            if !g.char_data.rasterize() || g.width == 0 || g.height == 0 {
                continue;
            }
            let (metrics, bitmap) = self
                .glyph_cache
                .entry(g.key)
                .or_insert_with(|| font.rasterize_config(g.key));
            target.draw_mask(bitmap, metrics.width, metrics.height, g.x, g.y, color, clip);
        }
    }
}
