//! Scroll, selection and hit-test math for a list of fixed-height rows.

use std::ops::Range;
use std::sync::Arc;

use setlist_engine::coords::{Rect, Viewport};

use crate::config::clamp_item_height;
use crate::item::PlayableItem;

/// Scroll offset, row height and selection over a shared item snapshot.
///
/// `bounds` is where the list sits on the host surface; row rects returned by
/// [`row_rect`](Self::row_rect) are local to the list (origin at the top-left
/// of `bounds`), matching the compositor's back buffer.
///
/// Invariants, maintained by every mutator:
/// - `0 <= scroll_offset <= max_scroll()`
/// - `selected < item_count()` whenever the list is non-empty
#[derive(Debug, Clone)]
pub struct ViewportModel {
    items: Arc<[PlayableItem]>,
    bounds: Rect,
    item_height: f32,
    scroll_offset: f32,
    selected: usize,
}

impl ViewportModel {
    pub fn new(bounds: Rect, item_height: f32) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            bounds,
            item_height: clamp_item_height(item_height),
            scroll_offset: 0.0,
            selected: 0,
        }
    }

    // ── items ─────────────────────────────────────────────────────────────

    /// Swaps in a new snapshot. Does not touch dirty state.
    pub fn set_items(&mut self, items: Arc<[PlayableItem]>) {
        self.items = items;
        self.selected = self.selected.min(self.items.len().saturating_sub(1));
        self.clamp_offset();
    }

    #[inline]
    pub fn items(&self) -> &Arc<[PlayableItem]> {
        &self.items
    }

    #[inline]
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    // ── geometry ──────────────────────────────────────────────────────────

    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.clamp_offset();
    }

    /// Size of the list area, for sizing the back buffer.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.bounds.size.x, self.bounds.size.y)
    }

    #[inline]
    pub fn item_height(&self) -> f32 {
        self.item_height
    }

    /// Sets the row height (clamped to 32–200 px), keeping the offset valid.
    pub fn set_item_height(&mut self, h: f32) {
        self.item_height = clamp_item_height(h);
        self.clamp_offset();
    }

    #[inline]
    pub fn view_height(&self) -> f32 {
        self.bounds.size.y.max(0.0)
    }

    pub fn content_height(&self) -> f32 {
        self.items.len() as f32 * self.item_height
    }

    pub fn max_scroll(&self) -> f32 {
        (self.content_height() - self.view_height()).max(0.0)
    }

    /// Rows that fit fully in the view, at least one.
    pub fn page_size(&self) -> usize {
        ((self.view_height() / self.item_height).floor() as usize).max(1)
    }

    // ── scrolling ─────────────────────────────────────────────────────────

    #[inline]
    pub fn scroll_offset(&self) -> f32 {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: f32) {
        self.scroll_offset = if offset.is_finite() { offset } else { 0.0 };
        self.clamp_offset();
    }

    pub fn scroll_by(&mut self, delta: f32) {
        if delta.is_finite() {
            self.set_scroll_offset(self.scroll_offset + delta);
        }
    }

    /// Centers row `index` in the view as far as the scroll range allows.
    pub fn scroll_to_index(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let h = self.item_height;
        let target = index as f32 * h - (self.view_height() - h) / 2.0;
        self.set_scroll_offset(target);
    }

    /// Scrolls the least amount that brings row `index` fully into view.
    ///
    /// A row taller than the view is aligned by its top edge instead.
    pub fn ensure_visible(&mut self, index: usize) {
        if index >= self.items.len() {
            return;
        }
        let top = index as f32 * self.item_height;
        let bottom = top + self.item_height;
        let view_h = self.view_height();
        if top < self.scroll_offset {
            self.set_scroll_offset(top);
        } else if bottom > self.scroll_offset + view_h {
            let target = if self.item_height > view_h { top } else { bottom - view_h };
            self.set_scroll_offset(target);
        }
    }

    fn clamp_offset(&mut self) {
        self.scroll_offset = self.scroll_offset.clamp(0.0, self.max_scroll());
    }

    // ── queries ───────────────────────────────────────────────────────────

    /// Row under host point `(x, y)`, if any.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<usize> {
        if !self.bounds.contains_x(x) || !y.is_finite() {
            return None;
        }
        let content_y = y - self.bounds.top() + self.scroll_offset;
        if content_y < 0.0 {
            return None;
        }
        let index = (content_y / self.item_height).floor() as usize;
        (index < self.items.len()).then_some(index)
    }

    /// Indices of rows at least partly inside the view.
    pub fn visible_range(&self) -> Range<usize> {
        if self.items.is_empty() || self.view_height() <= 0.0 {
            return 0..0;
        }
        let h = self.item_height;
        let first = (self.scroll_offset / h).floor() as usize;
        let last = ((self.scroll_offset + self.view_height()) / h).ceil() as usize;
        first.min(self.items.len())..last.min(self.items.len())
    }

    /// List-local rect of row `index` at the current scroll offset.
    pub fn row_rect(&self, index: usize) -> Rect {
        Rect::new(
            0.0,
            index as f32 * self.item_height - self.scroll_offset,
            self.bounds.size.x.max(0.0),
            self.item_height,
        )
    }

    // ── selection ─────────────────────────────────────────────────────────

    pub fn selected(&self) -> Option<usize> {
        (!self.items.is_empty()).then_some(self.selected)
    }

    /// Selects `index`. Returns `false` when out of range or unchanged.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.items.len() || index == self.selected {
            return false;
        }
        self.selected = index;
        true
    }

    /// Moves the selection by `delta` rows, saturating at both ends.
    pub fn move_selection(&mut self, delta: isize) -> bool {
        let Some(last) = self.items.len().checked_sub(1) else { return false };
        let target = self.selected.saturating_add_signed(delta).min(last);
        self.select(target)
    }

    pub fn select_first(&mut self) -> bool {
        self.select(0)
    }

    pub fn select_last(&mut self) -> bool {
        self.items.len().checked_sub(1).is_some_and(|last| self.select(last))
    }
}
