/// Size of a drawable area in pixels.
///
/// The view uses this both for the list viewport and for sizing the
/// compositor's back buffer.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_valid(self) -> bool {
        self.width > 0.0 && self.height > 0.0 && self.width.is_finite() && self.height.is_finite()
    }

    /// Whole-pixel dimensions for a backing buffer, rounded up.
    ///
    /// Returns `None` for empty or non-finite sizes.
    pub fn pixel_size(self) -> Option<(u32, u32)> {
        if !self.is_valid() {
            return None;
        }
        Some((self.width.ceil() as u32, self.height.ceil() as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_size_rounds_up() {
        assert_eq!(Viewport::new(10.2, 4.0).pixel_size(), Some((11, 4)));
    }

    #[test]
    fn pixel_size_rejects_empty_and_nan() {
        assert_eq!(Viewport::new(0.0, 4.0).pixel_size(), None);
        assert_eq!(Viewport::new(f32::NAN, 4.0).pixel_size(), None);
    }
}
