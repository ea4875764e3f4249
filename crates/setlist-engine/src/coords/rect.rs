use super::Vec2;

/// Axis-aligned rectangle in pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn left(self) -> f32 {
        self.origin.x
    }

    #[inline]
    pub fn top(self) -> f32 {
        self.origin.y
    }

    #[inline]
    pub fn right(self) -> f32 {
        self.origin.x + self.size.x
    }

    #[inline]
    pub fn bottom(self) -> f32 {
        self.origin.y + self.size.y
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        Vec2::new(self.origin.x + self.size.x * 0.5, self.origin.y + self.size.y * 0.5)
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.origin.is_finite() && self.size.is_finite()
    }

    /// Half-open containment: [min, max).
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        p.x >= self.left() && p.y >= self.top() && p.x < self.right() && p.y < self.bottom()
    }

    /// Horizontal half-open containment, ignoring y.
    #[inline]
    pub fn contains_x(self, x: f32) -> bool {
        x >= self.left() && x < self.right()
    }

    #[inline]
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.left().max(other.left());
        let y0 = self.top().max(other.top());
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());

        let w = x1 - x0;
        let h = y1 - y0;

        if w <= 0.0 || h <= 0.0 {
            None
        } else {
            Some(Rect::new(x0, y0, w, h))
        }
    }

    /// Shrinks the rectangle by `d` on every side. Never produces a negative size.
    #[inline]
    pub fn inset(self, d: f32) -> Rect {
        let w = (self.size.x - 2.0 * d).max(0.0);
        let h = (self.size.y - 2.0 * d).max(0.0);
        Rect::new(self.origin.x + d, self.origin.y + d, w, h)
    }

    #[inline]
    pub fn translate(self, dx: f32, dy: f32) -> Rect {
        Rect::new(self.origin.x + dx, self.origin.y + dy, self.size.x, self.size.y)
    }

    /// Splits off a column of `w` pixels from the left edge.
    ///
    /// Returns `(column, remainder)`; `w` is clamped to the available width.
    pub fn split_left(self, w: f32) -> (Rect, Rect) {
        let w = w.clamp(0.0, self.size.x.max(0.0));
        (
            Rect::new(self.origin.x, self.origin.y, w, self.size.y),
            Rect::new(self.origin.x + w, self.origin.y, self.size.x - w, self.size.y),
        )
    }

    /// Splits off a column of `w` pixels from the right edge.
    ///
    /// Returns `(remainder, column)`; `w` is clamped to the available width.
    pub fn split_right(self, w: f32) -> (Rect, Rect) {
        let w = w.clamp(0.0, self.size.x.max(0.0));
        let rest = self.size.x - w;
        (
            Rect::new(self.origin.x, self.origin.y, rest, self.size.y),
            Rect::new(self.origin.x + rest, self.origin.y, w, self.size.y),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_top_left_inclusive() {
        assert!(r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(0.0, 0.0)));
    }

    #[test]
    fn contains_bottom_right_exclusive() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(10.0, 10.0)));
    }

    #[test]
    fn contains_outside() {
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(-1.0, 5.0)));
        assert!(!r(0.0, 0.0, 10.0, 10.0).contains(Vec2::new(5.0, -1.0)));
    }

    // ── intersect ─────────────────────────────────────────────────────────

    #[test]
    fn intersect_overlapping() {
        let i = r(0.0, 0.0, 10.0, 10.0).intersect(r(5.0, 5.0, 10.0, 10.0)).unwrap();
        assert_eq!(i, r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn intersect_touching_edge_returns_none() {
        assert!(r(0.0, 0.0, 10.0, 10.0).intersect(r(10.0, 0.0, 10.0, 10.0)).is_none());
    }

    // ── layout helpers ────────────────────────────────────────────────────

    #[test]
    fn inset_never_goes_negative() {
        let i = r(0.0, 0.0, 4.0, 4.0).inset(5.0);
        assert_eq!(i.size, Vec2::new(0.0, 0.0));
        assert!(i.is_empty());
    }

    #[test]
    fn split_left_and_right_cover_the_rect() {
        let row = r(10.0, 0.0, 100.0, 20.0);
        let (col, rest) = row.split_left(30.0);
        assert_eq!(col, r(10.0, 0.0, 30.0, 20.0));
        assert_eq!(rest, r(40.0, 0.0, 70.0, 20.0));

        let (rest, col) = row.split_right(25.0);
        assert_eq!(rest, r(10.0, 0.0, 75.0, 20.0));
        assert_eq!(col, r(85.0, 0.0, 25.0, 20.0));
    }

    #[test]
    fn split_clamps_to_available_width() {
        let (col, rest) = r(0.0, 0.0, 10.0, 5.0).split_left(50.0);
        assert_eq!(col.size.x, 10.0);
        assert_eq!(rest.size.x, 0.0);
    }
}
