use setlist_engine::text::TextRasterizer;

use crate::resources::ResourceCache;
use crate::theme::{ThemeError, ThemeStore, ThemeVariant};

/// Row layout constants.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RowStyle {
    /// Rounded rows with icons and badges; otherwise flat classic rows.
    pub modern: bool,
    pub corner_radius: f32,
    /// Horizontal padding inside a row.
    pub padding: f32,
    /// Vertical gap between row backgrounds.
    pub gap: f32,
}

impl RowStyle {
    pub fn modern() -> Self {
        Self { modern: true, corner_radius: 4.0, padding: 8.0, gap: 2.0 }
    }

    pub fn classic() -> Self {
        Self { modern: false, corner_radius: 0.0, padding: 6.0, gap: 0.0 }
    }
}

/// Everything a render call needs besides the row itself.
///
/// Passed by `&mut` into the renderer and compositor each frame; the cache
/// and text system memoize internally.
pub struct RenderContext {
    pub theme: ThemeStore,
    pub resources: ResourceCache,
    pub text: Box<dyn TextRasterizer>,
    pub style: RowStyle,
}

impl RenderContext {
    pub fn new(theme: ThemeStore, text: Box<dyn TextRasterizer>, style: RowStyle) -> Self {
        Self { theme, resources: ResourceCache::new(), text, style }
    }

    /// Switches theme variant, dropping every cached resource.
    pub fn set_variant(&mut self, variant: ThemeVariant) -> bool {
        let changed = self.theme.set_variant(variant);
        if changed {
            self.resources.clear();
        }
        changed
    }

    /// Applies palette overrides; see [`ThemeStore::apply_overrides`].
    pub fn apply_overrides<'a, I>(&mut self, pairs: I) -> Result<usize, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let changed = self.theme.apply_overrides(pairs)?;
        if changed > 0 {
            self.resources.clear();
        }
        Ok(changed)
    }
}
