//! Memoized icons and scaled font metrics.
//!
//! Resources are keyed by `(kind, size)` and generated from the active theme
//! on first use. The cache never evicts single entries; the owner calls
//! [`ResourceCache::clear`] whenever the theme changes.

use std::collections::HashMap;

use setlist_engine::coords::{Rect, Vec2};
use setlist_engine::paint::Color;
use setlist_engine::raster::PixelBuffer;
use setlist_engine::text::TextMeasurer;

use crate::theme::{Palette, ThemeStore};

pub const MIN_RESOURCE_SIZE: u32 = 8;
pub const MAX_RESOURCE_SIZE: u32 = 128;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum IconKind {
    Play,
    Next,
    Warning,
    LoopInfinite,
    SyncLoss,
}

/// Draws an icon into a square, transparent buffer.
pub type IconGenerator = fn(&mut PixelBuffer, &Palette);

impl IconKind {
    pub const ALL: [IconKind; 5] = [
        IconKind::Play,
        IconKind::Next,
        IconKind::Warning,
        IconKind::LoopInfinite,
        IconKind::SyncLoss,
    ];

    pub fn generator(self) -> IconGenerator {
        match self {
            IconKind::Play => draw_play,
            IconKind::Next => draw_next,
            IconKind::Warning => draw_warning,
            IconKind::LoopInfinite => draw_infinite,
            IconKind::SyncLoss => draw_sync_loss,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontRole {
    Name,
    Ordinal,
    Duration,
    Badge,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Icon(IconKind),
    Font(FontRole),
}

/// Vertical metrics of the text face at one pixel size.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ScaledFont {
    pub role: FontRole,
    pub size: f32,
    pub ascent: f32,
    pub line_height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resource {
    Icon(PixelBuffer),
    Font(ScaledFont),
    /// Generation failed; callers draw a plain placeholder instead.
    Unavailable,
}

impl Resource {
    pub fn is_available(&self) -> bool {
        !matches!(self, Resource::Unavailable)
    }

    pub fn as_icon(&self) -> Option<&PixelBuffer> {
        match self {
            Resource::Icon(buf) => Some(buf),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&ScaledFont> {
        match self {
            Resource::Font(f) => Some(f),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct ResourceCache {
    entries: HashMap<(ResourceKind, u32), Resource>,
    generated: u64,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total generator runs since construction (hits do not count).
    pub fn generated(&self) -> u64 {
        self.generated
    }

    /// Returns the resource for `(kind, size)`, generating it on a miss.
    ///
    /// `size` is clamped to 8–128 px. Failed generations are cached as
    /// [`Resource::Unavailable`] so they are not retried every frame.
    pub fn get_or_create<T: TextMeasurer + ?Sized>(
        &mut self,
        kind: ResourceKind,
        size: u32,
        theme: &ThemeStore,
        text: &T,
    ) -> &Resource {
        let size = size.clamp(MIN_RESOURCE_SIZE, MAX_RESOURCE_SIZE);
        let generated = &mut self.generated;
        self.entries.entry((kind, size)).or_insert_with(|| {
            *generated += 1;
            let res = generate(kind, size, theme, text);
            if !res.is_available() {
                log::warn!("resource {kind:?} at {size}px unavailable; using placeholder");
            }
            res
        })
    }

    pub fn clear(&mut self) {
        if !self.entries.is_empty() {
            log::debug!("resource cache cleared ({} entries)", self.entries.len());
        }
        self.entries.clear();
    }
}

fn generate<T: TextMeasurer + ?Sized>(kind: ResourceKind, size: u32, theme: &ThemeStore, text: &T) -> Resource {
    match kind {
        ResourceKind::Icon(icon) => match PixelBuffer::try_new(size, size) {
            Ok(mut buf) => {
                (icon.generator())(&mut buf, theme.palette());
                Resource::Icon(buf)
            }
            Err(e) => {
                log::warn!("icon {icon:?}: {e}");
                Resource::Unavailable
            }
        },
        ResourceKind::Font(role) => {
            let px = size as f32;
            match text.metrics(px) {
                Some(m) => Resource::Font(ScaledFont {
                    role,
                    size: px,
                    ascent: m.ascent,
                    line_height: m.line_height,
                }),
                None => Resource::Unavailable,
            }
        }
    }
}

// ── icon generators ───────────────────────────────────────────────────────

fn draw_play(buf: &mut PixelBuffer, palette: &Palette) {
    let s = buf.width() as f32;
    let pad = s / 4.0;
    let clip = buf.bounds();
    buf.fill_triangle(
        Vec2::new(pad, pad),
        Vec2::new(pad, s - pad),
        Vec2::new(s - pad, s / 2.0),
        palette.current_text,
        clip,
    );
}

fn draw_next(buf: &mut PixelBuffer, palette: &Palette) {
    let s = buf.width() as f32;
    let pad = s / 4.0;
    let mid = s / 2.0;
    let clip = buf.bounds();
    buf.fill_triangle(Vec2::new(pad, pad), Vec2::new(pad, s - pad), Vec2::new(mid, mid), palette.accent, clip);
    buf.fill_triangle(Vec2::new(mid, pad), Vec2::new(mid, s - pad), Vec2::new(s - pad, mid), palette.accent, clip);
}

fn draw_warning(buf: &mut PixelBuffer, palette: &Palette) {
    let s = buf.width() as f32;
    let clip = buf.bounds();
    let c = Vec2::new(s / 2.0, s / 2.0);
    buf.fill_circle(c, s / 2.0 - 0.5, palette.warning, clip);

    let bar_w = (s / 8.0).max(1.5);
    buf.fill_rect(Rect::new(c.x - bar_w / 2.0, s * 0.22, bar_w, s * 0.36), Color::white(), clip);
    buf.fill_circle(Vec2::new(c.x, s * 0.74), bar_w * 0.6, Color::white(), clip);
}

fn draw_infinite(buf: &mut PixelBuffer, palette: &Palette) {
    let s = buf.width() as f32;
    let clip = buf.bounds();
    let r = s / 5.0;
    let stroke = (s / 12.0).max(1.0);
    buf.stroke_circle(Vec2::new(s / 2.0 - r, s / 2.0), r, stroke, palette.text, clip);
    buf.stroke_circle(Vec2::new(s / 2.0 + r, s / 2.0), r, stroke, palette.text, clip);
}

fn draw_sync_loss(buf: &mut PixelBuffer, palette: &Palette) {
    let s = buf.width() as f32;
    let pad = s / 4.0;
    let clip = buf.bounds();
    let stroke = (s / 8.0).max(1.5);
    buf.draw_line(Vec2::new(pad, pad), Vec2::new(s - pad, s - pad), stroke, palette.warning, clip);
    buf.draw_line(Vec2::new(s - pad, pad), Vec2::new(pad, s - pad), stroke, palette.warning, clip);
}
