use std::fmt;

use crate::coords::Rect;
use crate::paint::Color;

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Error returned by [`PixelBuffer::try_new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocError {
    pub width: u32,
    pub height: u32,
    pub reason: &'static str,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot allocate {}x{} pixel buffer: {}", self.width, self.height, self.reason)
    }
}

impl std::error::Error for AllocError {}

/// Owned `0xAARRGGBB` pixel storage, row-major, no padding.
///
/// Allocation is fallible: a buffer is either fully allocated or not created
/// at all, so callers can skip a frame instead of aborting the process.
#[derive(Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl PixelBuffer {
    /// Allocates a zeroed (fully transparent) buffer.
    pub fn try_new(width: u32, height: u32) -> Result<Self, AllocError> {
        let err = |reason| AllocError { width, height, reason };

        if width == 0 || height == 0 {
            return Err(err("zero-sized"));
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(err("exceeds maximum dimension"));
        }

        let len = (width as usize)
            .checked_mul(height as usize)
            .ok_or_else(|| err("size overflow"))?;

        let mut pixels = Vec::new();
        pixels.try_reserve_exact(len).map_err(|_| err("out of memory"))?;
        pixels.resize(len, 0);

        Ok(Self { width, height, pixels })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Full buffer area as a rect at the origin.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width as f32, self.height as f32)
    }

    #[inline]
    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    #[inline]
    pub(crate) fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    /// Converts to tightly packed RGBA8 (for image encoders).
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = vec![0u8; self.pixels.len() * 4];
        let texels: &mut [[u8; 4]] = bytemuck::cast_slice_mut(&mut out[..]);
        for (texel, &p) in texels.iter_mut().zip(&self.pixels) {
            let c = Color::from_argb_u32(p);
            *texel = [c.r, c.g, c.b, c.a];
        }
        out
    }

    /// Fills every pixel with `color` (no blending).
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color.to_argb_u32());
    }

    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Color::from_argb_u32(self.pixels[(y * self.width + x) as usize]))
    }

    /// Overwrites one pixel. Out-of-bounds writes are ignored.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x < self.width && y < self.height {
            self.pixels[(y * self.width + x) as usize] = color.to_argb_u32();
        }
    }

    /// Source-over blend of `color` scaled by `coverage` in `[0, 1]`.
    #[inline]
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f32) {
        if x >= self.width || y >= self.height {
            return;
        }
        let sa = (color.a as f32 / 255.0) * coverage.clamp(0.0, 1.0);
        if sa <= 0.0 {
            return;
        }
        let idx = (y * self.width + x) as usize;
        if sa >= 1.0 {
            self.pixels[idx] = color.with_alpha(255).to_argb_u32();
            return;
        }

        let dst = Color::from_argb_u32(self.pixels[idx]);
        let da = dst.a as f32 / 255.0;
        let oa = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let v = (s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa;
            v.round().clamp(0.0, 255.0) as u8
        };
        let out = Color::rgba(
            mix(color.r, dst.r),
            mix(color.g, dst.g),
            mix(color.b, dst.b),
            (oa * 255.0).round().clamp(0.0, 255.0) as u8,
        );
        self.pixels[idx] = out.to_argb_u32();
    }

    /// Integer pixel range covered by `rect ∩ clip ∩ bounds`.
    ///
    /// Returns `(x0, y0, x1, y1)` half-open, or `None` when empty.
    pub(crate) fn span(&self, rect: Rect, clip: Rect) -> Option<(u32, u32, u32, u32)> {
        let r = rect.intersect(clip)?.intersect(self.bounds())?;
        let x0 = r.left().round().max(0.0) as u32;
        let y0 = r.top().round().max(0.0) as u32;
        let x1 = (r.right().round() as u32).min(self.width);
        let y1 = (r.bottom().round() as u32).min(self.height);
        if x0 >= x1 || y0 >= y1 {
            None
        } else {
            Some((x0, y0, x1, y1))
        }
    }
}
