//! Anti-aliased shape rasterization on [`PixelBuffer`].
//!
//! Shapes are evaluated per pixel center with a signed distance function;
//! coverage is `clamp(0.5 - d, 0, 1)`, i.e. a one-pixel linear ramp across the
//! edge.

use crate::coords::{Rect, Vec2};
use crate::paint::Color;

use super::PixelBuffer;

impl PixelBuffer {
    /// Solid axis-aligned rectangle. Edges snap to whole pixels.
    pub fn fill_rect(&mut self, rect: Rect, color: Color, clip: Rect) {
        let Some((x0, y0, x1, y1)) = self.span(rect, clip) else { return };
        if color.a == 255 {
            let packed = color.to_argb_u32();
            let w = self.width();
            for y in y0..y1 {
                let row = (y * w) as usize;
                self.pixels_mut()[row + x0 as usize..row + x1 as usize].fill(packed);
            }
        } else {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.blend_pixel(x, y, color, 1.0);
                }
            }
        }
    }

    /// Rounded rectangle with a uniform corner radius.
    ///
    /// `radius` is clamped to half the shorter side; `0` degenerates to
    /// [`fill_rect`](Self::fill_rect).
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color, clip: Rect) {
        let r = radius.clamp(0.0, rect.size.x.min(rect.size.y) * 0.5);
        if r <= 0.0 {
            self.fill_rect(rect, color, clip);
            return;
        }

        let c = rect.center();
        let hx = rect.size.x * 0.5 - r;
        let hy = rect.size.y * 0.5 - r;

        self.fill_sdf(rect, clip, color, |p| {
            let qx = (p.x - c.x).abs() - hx;
            let qy = (p.y - c.y).abs() - hy;
            let ox = qx.max(0.0);
            let oy = qy.max(0.0);
            (ox * ox + oy * oy).sqrt() + qx.max(qy).min(0.0) - r
        });
    }

    /// Filled disc.
    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color, clip: Rect) {
        let bbox = Rect::new(center.x - radius - 1.0, center.y - radius - 1.0, 2.0 * radius + 2.0, 2.0 * radius + 2.0);
        self.fill_sdf(bbox, clip, color, |p| p.distance(center) - radius);
    }

    /// Circle outline of stroke `width`, centered on `radius`.
    pub fn stroke_circle(&mut self, center: Vec2, radius: f32, width: f32, color: Color, clip: Rect) {
        let half = width * 0.5;
        let ext = radius + half + 1.0;
        let bbox = Rect::new(center.x - ext, center.y - ext, 2.0 * ext, 2.0 * ext);
        self.fill_sdf(bbox, clip, color, |p| (p.distance(center) - radius).abs() - half);
    }

    /// Filled triangle; vertex winding does not matter.
    pub fn fill_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: Color, clip: Rect) {
        let min_x = a.x.min(b.x).min(c.x) - 1.0;
        let min_y = a.y.min(b.y).min(c.y) - 1.0;
        let max_x = a.x.max(b.x).max(c.x) + 1.0;
        let max_y = a.y.max(b.y).max(c.y) + 1.0;
        let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);

        let area = (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x);
        if area.abs() < f32::EPSILON {
            return;
        }
        // Orient edges so that "inside" is negative.
        let sign = area.signum();

        let edge = move |p: Vec2, e0: Vec2, e1: Vec2| {
            let dx = e1.x - e0.x;
            let dy = e1.y - e0.y;
            let len = (dx * dx + dy * dy).sqrt().max(f32::EPSILON);
            sign * ((p.x - e0.x) * dy - (p.y - e0.y) * dx) / len
        };

        self.fill_sdf(bbox, clip, color, |p| {
            edge(p, a, b).max(edge(p, b, c)).max(edge(p, c, a))
        });
    }

    /// Line segment with round caps.
    pub fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Color, clip: Rect) {
        let half = width * 0.5;
        let min_x = from.x.min(to.x) - half - 1.0;
        let min_y = from.y.min(to.y) - half - 1.0;
        let max_x = from.x.max(to.x) + half + 1.0;
        let max_y = from.y.max(to.y) + half + 1.0;
        let bbox = Rect::new(min_x, min_y, max_x - min_x, max_y - min_y);

        let d = to - from;
        let len_sq = (d.x * d.x + d.y * d.y).max(f32::EPSILON);

        self.fill_sdf(bbox, clip, color, |p| {
            let ap = p - from;
            let t = ((ap.x * d.x + ap.y * d.y) / len_sq).clamp(0.0, 1.0);
            p.distance(from + d * t) - half
        });
    }

    /// Composites `src` with its top-left corner at `(x, y)` (source-over).
    pub fn blit(&mut self, src: &PixelBuffer, x: f32, y: f32, clip: Rect) {
        let dst_rect = Rect::new(x.round(), y.round(), src.width() as f32, src.height() as f32);
        let Some((x0, y0, x1, y1)) = self.span(dst_rect, clip) else { return };
        let ox = dst_rect.left() as i64;
        let oy = dst_rect.top() as i64;

        for dy in y0..y1 {
            for dx in x0..x1 {
                let sx = (dx as i64 - ox) as u32;
                let sy = (dy as i64 - oy) as u32;
                if let Some(c) = src.pixel(sx, sy) {
                    self.blend_pixel(dx, dy, c, 1.0);
                }
            }
        }
    }

    /// Tints an 8-bit coverage mask (e.g. a rasterized glyph) with `color`.
    ///
    /// `mask` is `mask_w * mask_h` bytes, row-major; `(x, y)` is its top-left.
    pub fn draw_mask(
        &mut self,
        mask: &[u8],
        mask_w: usize,
        mask_h: usize,
        x: f32,
        y: f32,
        color: Color,
        clip: Rect,
    ) {
        if mask.len() < mask_w * mask_h {
            return;
        }
        let dst_rect = Rect::new(x.round(), y.round(), mask_w as f32, mask_h as f32);
        let Some((x0, y0, x1, y1)) = self.span(dst_rect, clip) else { return };
        let ox = dst_rect.left() as i64;
        let oy = dst_rect.top() as i64;

        for dy in y0..y1 {
            for dx in x0..x1 {
                let mx = (dx as i64 - ox) as usize;
                let my = (dy as i64 - oy) as usize;
                let cov = mask[my * mask_w + mx];
                if cov > 0 {
                    self.blend_pixel(dx, dy, color, cov as f32 / 255.0);
                }
            }
        }
    }

    fn fill_sdf(&mut self, bbox: Rect, clip: Rect, color: Color, sdf: impl Fn(Vec2) -> f32) {
        let Some((x0, y0, x1, y1)) = self.span(bbox, clip) else { return };
        for y in y0..y1 {
            for x in x0..x1 {
                let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
                let coverage = (0.5 - sdf(p)).clamp(0.0, 1.0);
                if coverage > 0.0 {
                    self.blend_pixel(x, y, color, coverage);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(w: u32, h: u32) -> PixelBuffer {
        let mut b = PixelBuffer::try_new(w, h).unwrap();
        b.clear(Color::black());
        b
    }

    const RED: Color = Color::rgb(255, 0, 0);

    // ── rect ──────────────────────────────────────────────────────────────

    #[test]
    fn fill_rect_respects_clip() {
        let mut b = canvas(10, 10);
        let clip = Rect::new(0.0, 0.0, 5.0, 10.0);
        b.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RED, clip);
        assert_eq!(b.pixel(4, 4), Some(RED));
        assert_eq!(b.pixel(5, 4), Some(Color::black()));
    }

    #[test]
    fn fill_rect_outside_bounds_is_noop() {
        let mut b = canvas(4, 4);
        b.fill_rect(Rect::new(10.0, 10.0, 5.0, 5.0), RED, Rect::new(0.0, 0.0, 100.0, 100.0));
        assert!(b.pixels().iter().all(|&p| p == Color::black().to_argb_u32()));
    }

    // ── rounded rect ──────────────────────────────────────────────────────

    #[test]
    fn rounded_rect_leaves_corners_unpainted() {
        let mut b = canvas(20, 20);
        b.fill_rounded_rect(Rect::new(0.0, 0.0, 20.0, 20.0), 8.0, RED, b.bounds());
        assert_eq!(b.pixel(10, 10), Some(RED));
        assert_eq!(b.pixel(0, 0), Some(Color::black()));
        assert_eq!(b.pixel(10, 0), Some(RED));
    }

    // ── circle / triangle / line ──────────────────────────────────────────

    #[test]
    fn circle_covers_center_not_corner() {
        let mut b = canvas(16, 16);
        b.fill_circle(Vec2::new(8.0, 8.0), 5.0, RED, b.bounds());
        assert_eq!(b.pixel(8, 8), Some(RED));
        assert_eq!(b.pixel(1, 1), Some(Color::black()));
    }

    #[test]
    fn ring_is_hollow() {
        let mut b = canvas(32, 32);
        b.stroke_circle(Vec2::new(16.0, 16.0), 10.0, 2.0, RED, b.bounds());
        assert_eq!(b.pixel(16, 16), Some(Color::black()));
        assert_eq!(b.pixel(26, 16).map(|c| c.r > 128), Some(true));
    }

    #[test]
    fn triangle_either_winding_fills_interior() {
        for (a, c) in [(Vec2::new(2.0, 2.0), Vec2::new(2.0, 18.0)), (Vec2::new(2.0, 18.0), Vec2::new(2.0, 2.0))] {
            let mut b = canvas(20, 20);
            b.fill_triangle(a, Vec2::new(18.0, 10.0), c, RED, b.bounds());
            assert_eq!(b.pixel(6, 10), Some(RED));
            assert_eq!(b.pixel(17, 2), Some(Color::black()));
        }
    }

    #[test]
    fn line_paints_along_segment() {
        let mut b = canvas(20, 20);
        b.draw_line(Vec2::new(2.0, 10.0), Vec2::new(18.0, 10.0), 2.0, RED, b.bounds());
        assert!(b.pixel(10, 9).unwrap().r > 200 || b.pixel(10, 10).unwrap().r > 200);
        assert_eq!(b.pixel(10, 2), Some(Color::black()));
    }

    // ── blit / mask ───────────────────────────────────────────────────────

    #[test]
    fn blit_skips_transparent_source_pixels() {
        let mut icon = PixelBuffer::try_new(2, 1).unwrap();
        icon.put_pixel(0, 0, RED);
        let mut b = canvas(4, 4);
        b.blit(&icon, 1.0, 1.0, b.bounds());
        assert_eq!(b.pixel(1, 1), Some(RED));
        assert_eq!(b.pixel(2, 1), Some(Color::black()));
    }

    #[test]
    fn draw_mask_partial_coverage_blends() {
        let mut b = canvas(2, 1);
        b.draw_mask(&[255, 0], 2, 1, 0.0, 0.0, Color::white(), b.bounds());
        assert_eq!(b.pixel(0, 0), Some(Color::white()));
        assert_eq!(b.pixel(1, 0), Some(Color::black()));
    }
}
