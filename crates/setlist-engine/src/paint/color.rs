use std::fmt;

/// Straight-alpha sRGB color, one byte per channel.
///
/// Pixel buffers store colors packed as `0xAARRGGBB`
/// (see [`to_argb_u32`](Self::to_argb_u32)). Blending happens in sRGB space,
/// which is what the list renderer has always looked like; luminance math
/// linearizes explicitly.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Error returned by [`Color::from_hex`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorParseError(pub String);

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color literal: {:?}", self.0)
    }
}

impl std::error::Error for ColorParseError {}

impl Color {
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    #[inline]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn gray(v: u8) -> Self {
        Self::rgb(v, v, v)
    }

    #[inline]
    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    #[inline]
    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    #[inline]
    pub const fn transparent() -> Self {
        Self::rgba(0, 0, 0, 0)
    }

    #[inline]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Parses `#RRGGBB`, `0xRRGGBB` or bare `RRGGBB` (case-insensitive).
    ///
    /// An optional trailing `AA` pair is accepted for alpha.
    pub fn from_hex(s: &str) -> Result<Self, ColorParseError> {
        let t = s.trim();
        let digits = t
            .strip_prefix('#')
            .or_else(|| t.strip_prefix("0x"))
            .or_else(|| t.strip_prefix("0X"))
            .unwrap_or(t);

        if !(digits.len() == 6 || digits.len() == 8) || !digits.is_ascii() {
            return Err(ColorParseError(s.to_string()));
        }

        let byte = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16).map_err(|_| ColorParseError(s.to_string()))
        };

        let a = if digits.len() == 8 { byte(6)? } else { 255 };
        Ok(Self::rgba(byte(0)?, byte(2)?, byte(4)?, a))
    }

    /// Packs into `0xAARRGGBB`.
    #[inline]
    pub const fn to_argb_u32(self) -> u32 {
        ((self.a as u32) << 24) | ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn from_argb_u32(v: u32) -> Self {
        Self::rgba((v >> 16) as u8, (v >> 8) as u8, v as u8, (v >> 24) as u8)
    }

    /// Per-channel linear mix: `ratio = 0` yields `self`, `1` yields `other`.
    pub fn blend(self, other: Color, ratio: f32) -> Color {
        let t = ratio.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 * (1.0 - t) + b as f32 * t) as u8;
        Color::rgba(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
            mix(self.a, other.a),
        )
    }

    /// Multiplies RGB by `factor`, saturating at 255. Alpha is kept.
    pub fn scaled(self, factor: f32) -> Color {
        let f = factor.max(0.0);
        let s = |c: u8| (c as f32 * f).round().min(255.0) as u8;
        Color::rgba(s(self.r), s(self.g), s(self.b), self.a)
    }

    /// Perceived brightness in `[0, 1]` using the Rec. 601 weights.
    ///
    /// Cheap heuristic for "is this a dark background"; use
    /// [`relative_luminance`](Self::relative_luminance) for contrast checks.
    pub fn perceived_brightness(self) -> f32 {
        (0.299 * self.r as f32 + 0.587 * self.g as f32 + 0.114 * self.b as f32) / 255.0
    }

    /// WCAG relative luminance on gamma-linearized channels.
    pub fn relative_luminance(self) -> f32 {
        0.2126 * linearize(self.r) + 0.7152 * linearize(self.g) + 0.0722 * linearize(self.b)
    }

    /// WCAG contrast ratio in `[1, 21]`. Symmetric in its arguments.
    pub fn contrast_ratio(self, other: Color) -> f32 {
        let l1 = self.relative_luminance();
        let l2 = other.relative_luminance();
        let (lighter, darker) = if l1 > l2 { (l1, l2) } else { (l2, l1) };
        (lighter + 0.05) / (darker + 0.05)
    }
}

#[inline]
fn linearize(c: u8) -> f32 {
    let c = c as f32 / 255.0;
    if c <= 0.03928 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a == 255 {
            write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            write!(f, "#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── hex ───────────────────────────────────────────────────────────────

    #[test]
    fn from_hex_accepts_all_prefixes() {
        let want = Color::rgb(0x2D, 0x5F, 0x8D);
        assert_eq!(Color::from_hex("#2D5F8D").unwrap(), want);
        assert_eq!(Color::from_hex("0x2d5f8d").unwrap(), want);
        assert_eq!(Color::from_hex("2D5F8D").unwrap(), want);
    }

    #[test]
    fn from_hex_reads_alpha_pair() {
        assert_eq!(Color::from_hex("#FF000080").unwrap(), Color::rgba(255, 0, 0, 128));
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("zzzzzz").is_err());
        assert!(Color::from_hex("").is_err());
    }

    #[test]
    fn display_round_trips_through_from_hex() {
        let c = Color::rgb(1, 120, 215);
        assert_eq!(Color::from_hex(&c.to_string()).unwrap(), c);
    }

    // ── packing ───────────────────────────────────────────────────────────

    #[test]
    fn argb_packing_layout() {
        assert_eq!(Color::rgba(0x11, 0x22, 0x33, 0x44).to_argb_u32(), 0x4411_2233);
        assert_eq!(Color::from_argb_u32(0x4411_2233), Color::rgba(0x11, 0x22, 0x33, 0x44));
    }

    // ── luminance / contrast ──────────────────────────────────────────────

    #[test]
    fn white_on_black_is_twenty_one() {
        let ratio = Color::white().contrast_ratio(Color::black());
        assert!((ratio - 21.0).abs() < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn close_grays_have_low_contrast() {
        let ratio = Color::gray(128).contrast_ratio(Color::gray(140));
        assert!(ratio < 1.5, "ratio = {ratio}");
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = Color::rgb(45, 95, 141);
        let b = Color::rgb(224, 224, 224);
        assert_eq!(a.contrast_ratio(b), b.contrast_ratio(a));
    }

    #[test]
    fn perceived_brightness_splits_dark_and_light() {
        assert!(Color::rgb(30, 30, 30).perceived_brightness() < 0.5);
        assert!(Color::rgb(240, 240, 240).perceived_brightness() > 0.5);
    }

    // ── mixing ────────────────────────────────────────────────────────────

    #[test]
    fn blend_endpoints() {
        let a = Color::rgb(0, 0, 0);
        let b = Color::rgb(200, 100, 50);
        assert_eq!(a.blend(b, 0.0), a);
        assert_eq!(a.blend(b, 1.0), b);
        assert_eq!(a.blend(b, 0.5), Color::rgb(100, 50, 25));
    }

    #[test]
    fn scaled_saturates() {
        assert_eq!(Color::rgb(240, 100, 0).scaled(1.15), Color::rgb(255, 115, 0));
    }
}
