//! Palettes, font sizes and color utilities.
//!
//! A [`ThemeStore`] holds the active [`ThemeVariant`], its [`Palette`] (with
//! any per-key overrides applied) and the matching [`FontSet`]. Every change
//! bumps [`ThemeStore::generation`] so caches keyed on theme colors know to
//! drop their contents.

use std::fmt;

use setlist_engine::paint::{Color, ColorParseError};

/// WCAG AA threshold for body text.
pub const MIN_TEXT_CONTRAST: f32 = 4.5;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum ThemeVariant {
    #[default]
    Dark,
    Light,
    /// High-contrast colors for a stage monitor.
    Stage,
}

impl ThemeVariant {
    /// Picks dark or light to match a host background color.
    pub fn detect(background: Color) -> Self {
        if background.perceived_brightness() < 0.5 {
            ThemeVariant::Dark
        } else {
            ThemeVariant::Light
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeVariant::Dark | ThemeVariant::Stage)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Palette {
    pub background: Color,
    pub text: Color,
    pub dimmed_text: Color,
    pub current_bg: Color,
    pub current_text: Color,
    pub next_bg: Color,
    pub next_text: Color,
    pub selected_bg: Color,
    pub selected_text: Color,
    pub hover_bg: Color,
    pub border: Color,
    pub warning: Color,
    pub accent: Color,
}

impl Palette {
    pub const fn dark() -> Self {
        Self {
            background: Color::rgb(30, 30, 30),
            text: Color::gray(224),
            dimmed_text: Color::gray(150),
            current_bg: Color::rgb(45, 95, 141),
            current_text: Color::white(),
            next_bg: Color::rgb(62, 62, 66),
            next_text: Color::gray(224),
            selected_bg: Color::gray(51),
            selected_text: Color::gray(224),
            hover_bg: Color::rgb(45, 45, 48),
            border: Color::gray(60),
            warning: Color::rgb(255, 0, 0),
            accent: Color::rgb(0, 120, 215),
        }
    }

    pub const fn light() -> Self {
        Self {
            background: Color::white(),
            text: Color::gray(30),
            dimmed_text: Color::gray(100),
            current_bg: Color::rgb(0, 120, 215),
            current_text: Color::white(),
            next_bg: Color::gray(224),
            next_text: Color::gray(30),
            selected_bg: Color::gray(204),
            selected_text: Color::gray(30),
            hover_bg: Color::gray(240),
            border: Color::gray(200),
            warning: Color::rgb(200, 0, 0),
            accent: Color::rgb(0, 120, 215),
        }
    }

    pub const fn stage() -> Self {
        Self {
            background: Color::rgb(15, 15, 15),
            text: Color::gray(230),
            dimmed_text: Color::gray(153),
            current_bg: Color::rgb(80, 120, 180),
            current_text: Color::white(),
            next_bg: Color::rgb(35, 35, 40),
            next_text: Color::gray(200),
            selected_bg: Color::rgb(30, 40, 58),
            selected_text: Color::gray(230),
            hover_bg: Color::rgb(28, 28, 32),
            border: Color::rgb(100, 150, 220),
            warning: Color::rgb(255, 64, 64),
            accent: Color::rgb(100, 150, 220),
        }
    }

    pub const fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark => Self::dark(),
            ThemeVariant::Light => Self::light(),
            ThemeVariant::Stage => Self::stage(),
        }
    }

    /// Override keys, in the order accepted by [`ThemeStore::apply_overrides`].
    pub const KEYS: [&'static str; 13] = [
        "background",
        "text",
        "dimmed_text",
        "current_bg",
        "current_text",
        "next_bg",
        "next_text",
        "selected_bg",
        "selected_text",
        "hover_bg",
        "border",
        "warning_red",
        "accent_blue",
    ];

    /// Color stored under an override key.
    pub fn get(&self, key: &str) -> Option<Color> {
        let mut copy = *self;
        copy.slot_mut(key).copied()
    }

    fn slot_mut(&mut self, key: &str) -> Option<&mut Color> {
        let slot = match key {
            "background" => &mut self.background,
            "text" => &mut self.text,
            "dimmed_text" => &mut self.dimmed_text,
            "current_bg" => &mut self.current_bg,
            "current_text" => &mut self.current_text,
            "next_bg" => &mut self.next_bg,
            "next_text" => &mut self.next_text,
            "selected_bg" => &mut self.selected_bg,
            "selected_text" => &mut self.selected_text,
            "hover_bg" => &mut self.hover_bg,
            "border" => &mut self.border,
            "warning_red" => &mut self.warning,
            "accent_blue" => &mut self.accent,
            _ => return None,
        };
        Some(slot)
    }

    /// Foreground/background pairs that carry text.
    fn text_pairs(&self) -> [(&'static str, Color, Color); 5] {
        [
            ("text/background", self.text, self.background),
            ("current_text/current_bg", self.current_text, self.current_bg),
            ("next_text/next_bg", self.next_text, self.next_bg),
            ("selected_text/selected_bg", self.selected_text, self.selected_bg),
            ("text/hover_bg", self.text, self.hover_bg),
        ]
    }
}

/// Pixel sizes for each text role.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FontSet {
    pub name: f32,
    pub ordinal: f32,
    pub duration: f32,
    pub badge: f32,
}

impl FontSet {
    pub const fn for_variant(variant: ThemeVariant) -> Self {
        match variant {
            ThemeVariant::Dark | ThemeVariant::Light => Self { name: 12.0, ordinal: 14.0, duration: 11.0, badge: 11.0 },
            ThemeVariant::Stage => Self { name: 18.0, ordinal: 20.0, duration: 16.0, badge: 14.0 },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    UnknownKey(String),
    BadColor { key: String, source: ColorParseError },
}

impl fmt::Display for ThemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ThemeError::UnknownKey(k) => write!(f, "unknown palette key {k:?}"),
            ThemeError::BadColor { key, source } => write!(f, "palette key {key:?}: {source}"),
        }
    }
}

impl std::error::Error for ThemeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ThemeError::UnknownKey(_) => None,
            ThemeError::BadColor { source, .. } => Some(source),
        }
    }
}

/// A text/background pair below the requested contrast.
#[derive(Debug, Clone, PartialEq)]
pub struct ContrastIssue {
    pub pair: &'static str,
    pub ratio: f32,
}

#[derive(Debug, Clone)]
pub struct ThemeStore {
    variant: ThemeVariant,
    palette: Palette,
    fonts: FontSet,
    generation: u64,
}

impl ThemeStore {
    pub fn new(variant: ThemeVariant) -> Self {
        Self {
            variant,
            palette: Palette::for_variant(variant),
            fonts: FontSet::for_variant(variant),
            generation: 0,
        }
    }

    #[inline]
    pub fn variant(&self) -> ThemeVariant {
        self.variant
    }

    #[inline]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    #[inline]
    pub fn fonts(&self) -> &FontSet {
        &self.fonts
    }

    #[inline]
    pub fn is_dark(&self) -> bool {
        self.variant.is_dark()
    }

    /// Incremented on every palette or font change.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Switches variant and resets the palette to its defaults (dropping
    /// overrides). Returns `false` when already active.
    pub fn set_variant(&mut self, variant: ThemeVariant) -> bool {
        if variant == self.variant {
            return false;
        }
        log::debug!("theme: {:?} -> {:?}", self.variant, variant);
        *self = Self { generation: self.generation + 1, ..Self::new(variant) };
        self.log_contrast_issues();
        true
    }

    /// Applies `(key, color)` overrides such as `("current_bg", "#2D5F8D")`.
    ///
    /// All pairs are parsed before any is applied, so an error leaves the
    /// palette untouched. Returns the number of slots that changed.
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<usize, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut staged = self.palette;
        for (key, value) in pairs {
            let color = Color::from_hex(value)
                .map_err(|source| ThemeError::BadColor { key: key.to_string(), source })?;
            let slot = staged
                .slot_mut(key)
                .ok_or_else(|| ThemeError::UnknownKey(key.to_string()))?;
            *slot = color;
        }

        let changed = Palette::KEYS
            .iter()
            .filter(|k| staged.get(k) != self.palette.get(k))
            .count();

        if changed > 0 {
            self.palette = staged;
            self.generation += 1;
            log::debug!("theme: {changed} palette override(s) applied");
            self.log_contrast_issues();
        }
        Ok(changed)
    }

    /// WCAG contrast ratio between two colors.
    pub fn contrast_ratio(fg: Color, bg: Color) -> f32 {
        fg.contrast_ratio(bg)
    }

    /// True when `fg` on `bg` meets `min_ratio`.
    pub fn validate_contrast(fg: Color, bg: Color, min_ratio: f32) -> bool {
        Self::contrast_ratio(fg, bg) >= min_ratio
    }

    /// Slightly lighter (dark themes) or darker (light themes) shade of `base`.
    pub fn hover_color(&self, base: Color) -> Color {
        if self.is_dark() { base.scaled(1.15) } else { base.scaled(0.95) }
    }

    pub fn blend(a: Color, b: Color, ratio: f32) -> Color {
        a.blend(b, ratio)
    }

    /// Text pairs in the active palette that fall below `min_ratio`.
    pub fn audit_contrast(&self, min_ratio: f32) -> Vec<ContrastIssue> {
        self.palette
            .text_pairs()
            .into_iter()
            .filter_map(|(pair, fg, bg)| {
                let ratio = Self::contrast_ratio(fg, bg);
                (ratio < min_ratio).then_some(ContrastIssue { pair, ratio })
            })
            .collect()
    }

    fn log_contrast_issues(&self) {
        for issue in self.audit_contrast(MIN_TEXT_CONTRAST) {
            log::warn!("theme {:?}: {} contrast {:.2} below {MIN_TEXT_CONTRAST}", self.variant, issue.pair, issue.ratio);
        }
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeVariant::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── contrast ──────────────────────────────────────────────────────────

    #[test]
    fn white_on_black_passes_aa() {
        assert!(ThemeStore::validate_contrast(Color::white(), Color::black(), 4.5));
    }

    #[test]
    fn close_grays_fail_aa() {
        assert!(!ThemeStore::validate_contrast(Color::gray(128), Color::gray(140), 4.5));
    }

    #[test]
    fn builtin_palettes_have_readable_body_text() {
        for v in [ThemeVariant::Dark, ThemeVariant::Light, ThemeVariant::Stage] {
            let t = ThemeStore::new(v);
            let p = t.palette();
            assert!(ThemeStore::validate_contrast(p.text, p.background, MIN_TEXT_CONTRAST), "{v:?}");
            assert!(ThemeStore::validate_contrast(p.current_text, p.current_bg, 3.0), "{v:?}");
        }
    }

    #[test]
    fn audit_reports_bad_override() {
        let mut t = ThemeStore::new(ThemeVariant::Dark);
        t.apply_overrides([("text", "#262626")]).unwrap();
        let issues = t.audit_contrast(MIN_TEXT_CONTRAST);
        assert!(issues.iter().any(|i| i.pair == "text/background"));
    }

    // ── detection / utilities ─────────────────────────────────────────────

    #[test]
    fn detect_follows_background_brightness() {
        assert_eq!(ThemeVariant::detect(Color::rgb(30, 30, 30)), ThemeVariant::Dark);
        assert_eq!(ThemeVariant::detect(Color::gray(250)), ThemeVariant::Light);
    }

    #[test]
    fn hover_lightens_on_dark_and_darkens_on_light() {
        let base = Color::rgb(100, 100, 100);
        assert_eq!(ThemeStore::new(ThemeVariant::Dark).hover_color(base), Color::rgb(115, 115, 115));
        assert_eq!(ThemeStore::new(ThemeVariant::Light).hover_color(base), Color::rgb(95, 95, 95));
    }

    #[test]
    fn hover_saturates_at_white() {
        let t = ThemeStore::new(ThemeVariant::Stage);
        assert_eq!(t.hover_color(Color::gray(250)), Color::white());
    }

    // ── variant / overrides ───────────────────────────────────────────────

    #[test]
    fn set_variant_bumps_generation_once() {
        let mut t = ThemeStore::new(ThemeVariant::Dark);
        assert!(t.set_variant(ThemeVariant::Light));
        assert!(!t.set_variant(ThemeVariant::Light));
        assert_eq!(t.generation(), 1);
        assert_eq!(t.palette().background, Color::white());
    }

    #[test]
    fn overrides_accept_all_hex_forms() {
        let mut t = ThemeStore::new(ThemeVariant::Dark);
        let n = t
            .apply_overrides([("current_bg", "#102030"), ("next_bg", "0x405060"), ("border", "708090")])
            .unwrap();
        assert_eq!(n, 3);
        assert_eq!(t.palette().current_bg, Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(t.palette().border, Color::rgb(0x70, 0x80, 0x90));
        assert_eq!(t.generation(), 1);
    }

    #[test]
    fn bad_override_leaves_palette_untouched() {
        let mut t = ThemeStore::new(ThemeVariant::Dark);
        let err = t.apply_overrides([("current_bg", "#102030"), ("text", "nope")]).unwrap_err();
        assert!(matches!(err, ThemeError::BadColor { ref key, .. } if key == "text"));
        assert_eq!(*t.palette(), Palette::dark());
        assert_eq!(t.generation(), 0);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut t = ThemeStore::default();
        assert_eq!(
            t.apply_overrides([("sparkle", "#FFFFFF")]),
            Err(ThemeError::UnknownKey("sparkle".into()))
        );
    }

    #[test]
    fn every_key_names_a_slot() {
        let p = Palette::dark();
        assert!(Palette::KEYS.iter().all(|k| p.get(k).is_some()));
        let mut t = ThemeStore::default();
        assert_eq!(
            t.apply_overrides([("progress_bar", "#000000")]),
            Err(ThemeError::UnknownKey("progress_bar".into()))
        );
    }

    #[test]
    fn no_op_override_keeps_generation() {
        let mut t = ThemeStore::new(ThemeVariant::Dark);
        assert_eq!(t.apply_overrides([("background", "#1E1E1E")]).unwrap(), 0);
        assert_eq!(t.generation(), 0);
    }

    #[test]
    fn stage_uses_larger_fonts() {
        let t = ThemeStore::new(ThemeVariant::Stage);
        assert!(t.fonts().name > FontSet::for_variant(ThemeVariant::Dark).name);
    }
}
