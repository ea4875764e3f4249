use crate::theme::ThemeVariant;

pub const MIN_ITEM_HEIGHT: f32 = 32.0;
pub const MAX_ITEM_HEIGHT: f32 = 200.0;
pub const DEFAULT_ITEM_HEIGHT: f32 = 40.0;

/// Clamps a row height to the supported range. Non-finite input falls back
/// to the default.
pub fn clamp_item_height(h: f32) -> f32 {
    if h.is_finite() {
        h.clamp(MIN_ITEM_HEIGHT, MAX_ITEM_HEIGHT)
    } else {
        DEFAULT_ITEM_HEIGHT
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum ItemHeightPreset {
    Small,
    #[default]
    Medium,
    Large,
}

impl ItemHeightPreset {
    pub const fn px(self) -> f32 {
        match self {
            ItemHeightPreset::Small => 32.0,
            ItemHeightPreset::Medium => 40.0,
            ItemHeightPreset::Large => 56.0,
        }
    }
}

/// View settings, normally filled in by host preference glue.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewConfig {
    pub item_height: f32,
    /// Rounded rows with icons and badges; `false` draws flat classic rows.
    pub modern_rendering: bool,
    /// Pixels scrolled per wheel line.
    pub scroll_line_px: f32,
    pub theme_variant: ThemeVariant,
}

impl ViewConfig {
    pub fn with_item_height(mut self, h: f32) -> Self {
        self.item_height = clamp_item_height(h);
        self
    }

    pub fn with_preset(self, preset: ItemHeightPreset) -> Self {
        self.with_item_height(preset.px())
    }

    pub fn with_modern_rendering(mut self, on: bool) -> Self {
        self.modern_rendering = on;
        self
    }

    pub fn with_scroll_line_px(mut self, px: f32) -> Self {
        self.scroll_line_px = px.max(1.0);
        self
    }

    pub fn with_theme(mut self, variant: ThemeVariant) -> Self {
        self.theme_variant = variant;
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            item_height: DEFAULT_ITEM_HEIGHT,
            modern_rendering: true,
            scroll_line_px: DEFAULT_ITEM_HEIGHT,
            theme_variant: ThemeVariant::Dark,
        }
    }
}
