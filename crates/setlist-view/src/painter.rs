use setlist_engine::coords::{Rect, Vec2};
use setlist_engine::paint::Color;
use setlist_engine::raster::PixelBuffer;
use setlist_engine::text::TextRasterizer;

/// Drawing surface passed to the row renderer.
///
/// Wraps the compositor's back buffer with a clip stack so every call is
/// confined to the row being painted. Coordinates are buffer pixels.
pub struct Painter<'a> {
    target: &'a mut PixelBuffer,
    clips: Vec<Rect>,
}

impl<'a> Painter<'a> {
    pub fn new(target: &'a mut PixelBuffer) -> Self {
        let full = target.bounds();
        Self { target, clips: vec![full] }
    }

    /// Current clip rect.
    #[inline]
    pub fn clip(&self) -> Rect {
        self.clips.last().copied().unwrap_or_default()
    }

    // ── clipping ──────────────────────────────────────────────────────────

    /// Narrows the clip to `rect ∩ current`. Must be paired with [`pop_clip`].
    ///
    /// [`pop_clip`]: Self::pop_clip
    pub fn push_clip(&mut self, rect: Rect) {
        let next = self.clip().intersect(rect).unwrap_or_default();
        self.clips.push(next);
    }

    /// Restores the previous clip. The buffer-wide root clip is never popped.
    pub fn pop_clip(&mut self) {
        if self.clips.len() > 1 {
            self.clips.pop();
        }
    }

    // ── drawing ───────────────────────────────────────────────────────────

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let clip = self.clip();
        self.target.fill_rect(rect, color, clip);
    }

    /// Pass `radius = 0.0` for sharp corners.
    pub fn fill_rounded_rect(&mut self, rect: Rect, radius: f32, color: Color) {
        let clip = self.clip();
        self.target.fill_rounded_rect(rect, radius, color, clip);
    }

    /// One-pixel outline drawn inside `rect`.
    pub fn stroke_rect(&mut self, rect: Rect, color: Color) {
        let (x, y, w, h) = (rect.left(), rect.top(), rect.size.x, rect.size.y);
        self.fill_rect(Rect::new(x, y, w, 1.0), color);
        self.fill_rect(Rect::new(x, y + h - 1.0, w, 1.0), color);
        self.fill_rect(Rect::new(x, y, 1.0, h), color);
        self.fill_rect(Rect::new(x + w - 1.0, y, 1.0, h), color);
    }

    pub fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        let clip = self.clip();
        self.target.fill_circle(center, radius, color, clip);
    }

    /// Composites a pre-rendered image with its top-left at `origin`.
    pub fn image(&mut self, image: &PixelBuffer, origin: Vec2) {
        let clip = self.clip();
        self.target.blit(image, origin.x, origin.y, clip);
    }

    /// Single line of text; `origin` is the top-left of the line box.
    pub fn text(
        &mut self,
        text_system: &mut dyn TextRasterizer,
        text: &str,
        size: f32,
        color: Color,
        origin: Vec2,
    ) {
        let clip = self.clip();
        text_system.draw_text(self.target, text, size, origin, color, clip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_clips_intersect_and_restore() {
        let mut buf = PixelBuffer::try_new(20, 20).unwrap();
        let mut p = Painter::new(&mut buf);
        p.push_clip(Rect::new(0.0, 0.0, 10.0, 10.0));
        p.push_clip(Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(p.clip(), Rect::new(5.0, 5.0, 5.0, 5.0));
        p.pop_clip();
        p.pop_clip();
        p.pop_clip();
        assert_eq!(p.clip(), Rect::new(0.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn drawing_is_confined_to_clip() {
        let mut buf = PixelBuffer::try_new(10, 10).unwrap();
        {
            let mut p = Painter::new(&mut buf);
            p.push_clip(Rect::new(0.0, 0.0, 10.0, 4.0));
            p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::white());
        }
        assert_eq!(buf.pixel(5, 3), Some(Color::white()));
        assert_eq!(buf.pixel(5, 4), Some(Color::transparent()));
    }

    #[test]
    fn disjoint_clip_draws_nothing() {
        let mut buf = PixelBuffer::try_new(10, 10).unwrap();
        {
            let mut p = Painter::new(&mut buf);
            p.push_clip(Rect::new(50.0, 50.0, 5.0, 5.0));
            p.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), Color::white());
        }
        assert!(buf.pixels().iter().all(|&px| px == 0));
    }

    #[test]
    fn stroke_rect_leaves_interior() {
        let mut buf = PixelBuffer::try_new(6, 6).unwrap();
        Painter::new(&mut buf).stroke_rect(Rect::new(0.0, 0.0, 6.0, 6.0), Color::white());
        assert_eq!(buf.pixel(0, 3), Some(Color::white()));
        assert_eq!(buf.pixel(3, 3), Some(Color::transparent()));
    }
}
