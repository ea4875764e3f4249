//! Off-screen frame composition.
//!
//! The compositor owns the back buffer. Each frame it repaints only the
//! dirty rows inside the visible range, then hands the whole buffer to the
//! host surface in a single `present`. A frame that cannot allocate its
//! buffer is skipped before anything is painted.

use setlist_engine::paint::Color;
use setlist_engine::raster::{AllocError, PixelBuffer};
use setlist_engine::surface::{PresentError, Surface};

use crate::context::RenderContext;
use crate::dirty::DirtyTracker;
use crate::painter::Painter;
use crate::renderer::draw_item;
use crate::state::VisualState;
use crate::viewport::ViewportModel;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BufferStatus {
    Reused,
    Allocated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Viewport has no area.
    EmptyViewport,
    Allocation(AllocError),
    Present(PresentError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameOutcome {
    Presented { rows_painted: usize },
    Skipped(SkipReason),
}

impl FrameOutcome {
    pub fn is_presented(&self) -> bool {
        matches!(self, FrameOutcome::Presented { .. })
    }
}

#[derive(Debug, Default)]
pub struct FrameCompositor {
    buffer: Option<PixelBuffer>,
    allocations: u64,
}

impl FrameCompositor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The back buffer, if one is allocated.
    pub fn buffer(&self) -> Option<&PixelBuffer> {
        self.buffer.as_ref()
    }

    /// Number of successful buffer allocations so far.
    pub fn allocations(&self) -> u64 {
        self.allocations
    }

    /// Makes sure the back buffer is `width x height`.
    ///
    /// Allocates (and clears to `background`) only when the size differs.
    /// On failure the old buffer is dropped so a stale size is never reused.
    pub fn ensure_buffer(&mut self, width: u32, height: u32, background: Color) -> Result<BufferStatus, AllocError> {
        if self.buffer.as_ref().is_some_and(|b| b.dimensions() == (width, height)) {
            return Ok(BufferStatus::Reused);
        }

        self.buffer = None;
        let mut buf = PixelBuffer::try_new(width, height)?;
        buf.clear(background);
        self.buffer = Some(buf);
        self.allocations += 1;
        log::debug!("back buffer allocated at {width}x{height}");
        Ok(BufferStatus::Allocated)
    }

    /// Paints dirty visible rows and presents the buffer once.
    pub fn render_frame(
        &mut self,
        viewport: &ViewportModel,
        states: &[VisualState],
        dirty: &mut DirtyTracker,
        ctx: &mut RenderContext,
        surface: &mut dyn Surface,
    ) -> FrameOutcome {
        let Some((w, h)) = viewport.viewport().pixel_size() else {
            return FrameOutcome::Skipped(SkipReason::EmptyViewport);
        };

        let background = ctx.theme.palette().background;
        match self.ensure_buffer(w, h, background) {
            Ok(BufferStatus::Allocated) => dirty.mark_all_dirty(),
            Ok(BufferStatus::Reused) => {}
            Err(e) => {
                log::warn!("frame skipped: {e}");
                return FrameOutcome::Skipped(SkipReason::Allocation(e));
            }
        }
        let Some(buffer) = self.buffer.as_mut() else {
            return FrameOutcome::Skipped(SkipReason::EmptyViewport);
        };

        let full = dirty.is_full_repaint();
        if full {
            // Also wipes whatever sat below the last row.
            buffer.clear(background);
        }

        let items = viewport.items();
        let mut rows_painted = 0;
        {
            let mut painter = Painter::new(buffer);
            for i in viewport.visible_range() {
                if !dirty.is_dirty(i) {
                    continue;
                }
                let state = states.get(i).copied().unwrap_or_default();
                draw_item(&mut painter, viewport.row_rect(i), &items[i], &state, ctx);
                dirty.clear_after(i);
                rows_painted += 1;
            }
        }
        if full {
            dirty.finish_frame();
        }

        log::trace!("frame: {rows_painted} row(s) painted{}", if full { " (full)" } else { "" });

        match surface.present(buffer) {
            Ok(()) => FrameOutcome::Presented { rows_painted },
            Err(e) => {
                log::warn!("present failed: {e}");
                dirty.mark_all_dirty();
                FrameOutcome::Skipped(SkipReason::Present(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use setlist_engine::coords::Rect;
    use setlist_engine::surface::MemorySurface;
    use setlist_engine::text::FixedAdvanceText;

    use super::*;
    use crate::context::RowStyle;
    use crate::item::PlayableItem;
    use crate::theme::{Palette, ThemeStore, ThemeVariant};

    fn items(n: usize) -> Arc<[PlayableItem]> {
        (0..n)
            .map(|i| PlayableItem::new(i as u64, i as u32 + 1, format!("Song {}", i + 1), 0.0, 200.0))
            .collect()
    }

    fn ctx() -> RenderContext {
        RenderContext::new(ThemeStore::new(ThemeVariant::Dark), Box::new(FixedAdvanceText::default()), RowStyle::modern())
    }

    fn viewport(n: usize, h: f32) -> ViewportModel {
        let mut vm = ViewportModel::new(Rect::new(0.0, 0.0, 200.0, h), 40.0);
        vm.set_items(items(n));
        vm
    }

    // ── buffer ────────────────────────────────────────────────────────────

    #[test]
    fn same_size_allocates_once() {
        let mut fc = FrameCompositor::new();
        assert_eq!(fc.ensure_buffer(100, 50, Color::black()), Ok(BufferStatus::Allocated));
        assert_eq!(fc.ensure_buffer(100, 50, Color::black()), Ok(BufferStatus::Reused));
        assert_eq!(fc.allocations(), 1);
        assert_eq!(fc.ensure_buffer(120, 50, Color::black()), Ok(BufferStatus::Allocated));
        assert_eq!(fc.allocations(), 2);
    }

    #[test]
    fn new_buffer_is_cleared_to_background() {
        let mut fc = FrameCompositor::new();
        fc.ensure_buffer(4, 4, Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(fc.buffer().and_then(|b| b.pixel(3, 3)), Some(Color::rgb(1, 2, 3)));
    }

    #[test]
    fn failed_allocation_drops_old_buffer() {
        let mut fc = FrameCompositor::new();
        fc.ensure_buffer(10, 10, Color::black()).unwrap();
        assert!(fc.ensure_buffer(0, 10, Color::black()).is_err());
        assert!(fc.buffer().is_none());
    }

    // ── frames ────────────────────────────────────────────────────────────

    #[test]
    fn first_frame_paints_visible_rows_and_presents_once() {
        let vm = viewport(20, 200.0);
        let mut dirty = DirtyTracker::with_len(20);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();

        let out = fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        assert_eq!(out, FrameOutcome::Presented { rows_painted: 5 });
        assert_eq!(surface.present_count(), 1);
        assert!(!dirty.is_full_repaint());
        assert!((0..5).all(|i| !dirty.is_dirty(i)));
        assert!(dirty.is_dirty(5));
    }

    #[test]
    fn clean_frame_paints_nothing_but_still_presents() {
        let vm = viewport(20, 200.0);
        let mut dirty = DirtyTracker::with_len(20);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();

        fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        let out = fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        assert_eq!(out, FrameOutcome::Presented { rows_painted: 0 });
        assert_eq!(surface.present_count(), 2);
    }

    #[test]
    fn appended_row_is_painted_without_explicit_mark() {
        let mut vm = viewport(5, 400.0);
        let mut dirty = DirtyTracker::with_len(5);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();
        fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);

        vm.set_items(items(6));
        let out = fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        assert_eq!(out, FrameOutcome::Presented { rows_painted: 1 });
        assert!(!dirty.is_dirty(5));
    }

    #[test]
    fn only_marked_rows_repaint() {
        let vm = viewport(20, 200.0);
        let mut dirty = DirtyTracker::with_len(20);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();
        fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);

        dirty.mark_dirty(2);
        dirty.mark_dirty(15);
        let states = vec![VisualState { is_playing: true, ..Default::default() }; 20];
        let out = fc.render_frame(&vm, &states, &mut dirty, &mut c, &mut surface);
        assert_eq!(out, FrameOutcome::Presented { rows_painted: 1 });

        let frame = surface.last_frame().unwrap();
        let current = Palette::dark().current_bg;
        assert_eq!(frame.pixel(190, 100), Some(current));
        assert_ne!(frame.pixel(190, 20), Some(current));
        assert!(dirty.is_dirty(15));
    }

    #[test]
    fn full_repaint_clears_area_below_last_row() {
        let mut vm = viewport(5, 400.0);
        let mut dirty = DirtyTracker::with_len(5);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();
        let states = vec![VisualState { is_playing: true, ..Default::default() }; 5];
        fc.render_frame(&vm, &states, &mut dirty, &mut c, &mut surface);
        assert_eq!(surface.last_frame().unwrap().pixel(190, 180), Some(Palette::dark().current_bg));

        vm.set_items(items(2));
        dirty.resize(2);
        dirty.mark_all_dirty();
        fc.render_frame(&vm, &states, &mut dirty, &mut c, &mut surface);
        assert_eq!(surface.last_frame().unwrap().pixel(190, 180), Some(Palette::dark().background));
    }

    #[test]
    fn empty_viewport_skips() {
        let vm = viewport(3, 0.0);
        let mut dirty = DirtyTracker::with_len(3);
        let mut surface = MemorySurface::new();
        let out = FrameCompositor::new().render_frame(&vm, &[], &mut dirty, &mut ctx(), &mut surface);
        assert_eq!(out, FrameOutcome::Skipped(SkipReason::EmptyViewport));
        assert_eq!(surface.present_count(), 0);
        assert!(dirty.is_dirty(0));
    }

    #[test]
    fn oversized_viewport_skips_and_retries() {
        let mut vm = ViewportModel::new(Rect::new(0.0, 0.0, 100_000.0, 200.0), 40.0);
        vm.set_items(items(3));
        let mut dirty = DirtyTracker::with_len(3);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();

        let out = fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        assert!(matches!(out, FrameOutcome::Skipped(SkipReason::Allocation(_))));
        assert_eq!(surface.present_count(), 0);
        assert!(dirty.is_dirty(0));

        vm.set_bounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        assert!(fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface).is_presented());
        assert_eq!(surface.present_count(), 1);
    }

    #[test]
    fn present_failure_requeues_everything() {
        let vm = viewport(4, 200.0);
        let mut dirty = DirtyTracker::with_len(4);
        let mut c = ctx();
        let mut fc = FrameCompositor::new();
        let mut surface = MemorySurface::new();
        surface.fail_next_present();

        let out = fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface);
        assert_eq!(out, FrameOutcome::Skipped(SkipReason::Present(PresentError::Lost)));
        assert!(dirty.is_full_repaint());
        assert_eq!(fc.render_frame(&vm, &[], &mut dirty, &mut c, &mut surface), FrameOutcome::Presented { rows_painted: 4 });
    }
}
