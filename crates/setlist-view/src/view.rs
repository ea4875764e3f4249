//! The list view: wires input, state resolution and compositing together.
//!
//! [`PlaylistView`] is what a host embeds. It owns every pipeline stage and
//! exposes three entry points: push data (`set_items`, `set_playback`),
//! route input (`handle_event`), and draw (`render`).

use std::sync::Arc;
use std::time::{Duration, Instant};

use setlist_engine::coords::{Rect, Vec2};
use setlist_engine::input::{
    InputEvent, InputState, Key, KeyState, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent,
};
use setlist_engine::raster::PixelBuffer;
use setlist_engine::surface::Surface;
use setlist_engine::text::TextRasterizer;
use setlist_engine::time::FrameClock;

use crate::compositor::{FrameCompositor, FrameOutcome};
use crate::config::ViewConfig;
use crate::context::{RenderContext, RowStyle};
use crate::dirty::DirtyTracker;
use crate::event::{EventResponse, PlaylistIntent};
use crate::item::{diff_snapshots, PlayableItem};
use crate::state::{InteractionContext, ItemStateResolver, PlaybackContext, VisualState};
use crate::theme::{ThemeError, ThemeStore, ThemeVariant};
use crate::viewport::ViewportModel;

/// Pointer travel before a press turns into a drag.
pub const DRAG_THRESHOLD_PX: f32 = 4.0;
/// Two presses on the same row within this window form a double click.
pub const DOUBLE_CLICK: Duration = Duration::from_millis(400);

/// Counters for the host's diagnostics overlay.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct FrameStats {
    pub frames_presented: u64,
    pub frames_skipped: u64,
    /// Rows painted over the view's lifetime.
    pub rows_painted: u64,
    pub last_rows_painted: usize,
    /// Presented frames per second over the last second.
    pub redraw_rate: f32,
}

#[derive(Debug, Copy, Clone)]
struct DragState {
    from: usize,
    origin: Vec2,
    active: bool,
    target: Option<usize>,
}

pub struct PlaylistView {
    config: ViewConfig,
    viewport: ViewportModel,
    resolver: ItemStateResolver,
    dirty: DirtyTracker,
    compositor: FrameCompositor,
    ctx: RenderContext,
    input: InputState,
    playback: PlaybackContext,
    hovered: Option<usize>,
    drag: Option<DragState>,
    last_click: Option<(usize, Instant)>,
    clock: FrameClock,
    stats: FrameStats,
    needs_redraw: bool,
}

impl PlaylistView {
    /// Creates an empty view occupying `bounds` on the host surface.
    pub fn new(config: ViewConfig, bounds: Rect, text: Box<dyn TextRasterizer>) -> Self {
        let theme = ThemeStore::new(config.theme_variant);
        let style = if config.modern_rendering { RowStyle::modern() } else { RowStyle::classic() };
        log::debug!(
            "playlist view: {:?} theme, {}px rows, {} rendering",
            config.theme_variant,
            config.item_height,
            if config.modern_rendering { "modern" } else { "classic" },
        );

        Self {
            viewport: ViewportModel::new(bounds, config.item_height),
            resolver: ItemStateResolver::new(),
            dirty: DirtyTracker::new(),
            compositor: FrameCompositor::new(),
            ctx: RenderContext::new(theme, text, style),
            input: InputState::default(),
            playback: PlaybackContext::default(),
            hovered: None,
            drag: None,
            last_click: None,
            clock: FrameClock::new(),
            stats: FrameStats::default(),
            needs_redraw: true,
            config,
        }
    }

    // ── accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn viewport(&self) -> &ViewportModel {
        &self.viewport
    }

    pub fn theme(&self) -> &ThemeStore {
        &self.ctx.theme
    }

    pub fn playback(&self) -> PlaybackContext {
        self.playback
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Visual states resolved for the last rendered frame.
    pub fn states(&self) -> &[VisualState] {
        self.resolver.states()
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// The composited back buffer, once a frame has been rendered.
    pub fn frame_buffer(&self) -> Option<&PixelBuffer> {
        self.compositor.buffer()
    }

    /// Whether the host should schedule a `render`.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Requests a redraw without changing anything, e.g. after an expose.
    pub fn invalidate(&mut self) {
        self.needs_redraw = true;
    }

    // ── data ──────────────────────────────────────────────────────────────

    /// Replaces the item snapshot, repainting only rows that changed.
    pub fn set_items(&mut self, items: Arc<[PlayableItem]>) {
        let diff = diff_snapshots(self.viewport.items(), &items);
        if diff.is_unchanged() {
            return;
        }

        let invalid = items.iter().filter(|it| !it.is_valid()).count();
        if invalid > 0 {
            log::warn!("{invalid} of {} item(s) have invalid data", items.len());
        }

        let len = items.len();
        self.track_scroll(|vm| vm.set_items(items));
        self.dirty.resize(len);
        for &i in &diff.changed {
            self.dirty.mark_dirty(i);
        }
        if diff.shrunk {
            self.dirty.mark_all_dirty();
        }
        if self.hovered.is_some_and(|h| h >= len) {
            self.hovered = None;
        }
        if self.drag.is_some_and(|d| d.from >= len) {
            self.drag = None;
        }
        self.needs_redraw = true;
    }

    /// Updates playback state, scrolling a newly current row into view.
    pub fn set_playback(&mut self, playback: PlaybackContext) {
        if playback == self.playback {
            return;
        }
        if playback.current != self.playback.current {
            if let Some(current) = playback.current {
                self.track_scroll(|vm| vm.ensure_visible(current));
            }
        }
        self.playback = playback;
        self.needs_redraw = true;
    }

    // ── configuration ─────────────────────────────────────────────────────

    /// Moves or resizes the list on the host surface.
    pub fn resize(&mut self, bounds: Rect) {
        if bounds == self.viewport.bounds() {
            return;
        }
        self.viewport.set_bounds(bounds);
        self.invalidate_all();
    }

    pub fn set_theme(&mut self, variant: ThemeVariant) {
        self.config.theme_variant = variant;
        if self.ctx.set_variant(variant) {
            self.invalidate_all();
        }
    }

    /// Applies palette overrides; see [`ThemeStore::apply_overrides`].
    pub fn apply_theme_overrides<'a, I>(&mut self, pairs: I) -> Result<usize, ThemeError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let changed = self.ctx.apply_overrides(pairs)?;
        if changed > 0 {
            self.invalidate_all();
        }
        Ok(changed)
    }

    pub fn set_item_height(&mut self, h: f32) {
        self.config = self.config.clone().with_item_height(h);
        if self.config.item_height != self.viewport.item_height() {
            self.viewport.set_item_height(self.config.item_height);
            self.invalidate_all();
        }
    }

    pub fn set_modern_rendering(&mut self, on: bool) {
        if self.config.modern_rendering == on {
            return;
        }
        self.config.modern_rendering = on;
        self.ctx.style = if on { RowStyle::modern() } else { RowStyle::classic() };
        self.invalidate_all();
    }

    fn invalidate_all(&mut self) {
        self.dirty.mark_all_dirty();
        self.needs_redraw = true;
    }

    /// Runs a viewport mutation; any scroll change repaints everything.
    fn track_scroll(&mut self, f: impl FnOnce(&mut ViewportModel)) {
        let before = self.viewport.scroll_offset();
        f(&mut self.viewport);
        if self.viewport.scroll_offset() != before {
            self.invalidate_all();
        }
    }

    // ── input ─────────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: &InputEvent) -> EventResponse {
        self.handle_event_at(event, Instant::now())
    }

    /// Like [`handle_event`](Self::handle_event) with an explicit timestamp
    /// for double-click detection.
    pub fn handle_event_at(&mut self, event: &InputEvent, now: Instant) -> EventResponse {
        self.input.apply_event(event);

        match event {
            InputEvent::Key { key, state: KeyState::Pressed, .. } => self.on_key(*key),

            InputEvent::MouseWheel { delta, .. } => {
                if self.pointer_outside() {
                    return EventResponse::IGNORED;
                }
                // Positive wheel y reveals earlier rows.
                let dy = delta.vertical_pixels(self.config.scroll_line_px);
                self.track_scroll(|vm| vm.scroll_by(-dy));
                // Rows moved under a still pointer.
                if let Some((x, y)) = self.input.pointer_pos {
                    let row = self.interactive_row_at(Vec2::new(x, y));
                    self.set_hovered(row);
                }
                EventResponse::CONSUMED
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => self.on_pointer_moved(Vec2::new(*x, *y)),

            InputEvent::PointerButton(PointerButtonEvent { button: MouseButton::Left, state, x, y, .. }) => {
                let pos = Vec2::new(*x, *y);
                match state {
                    MouseButtonState::Pressed => self.on_press(pos, now),
                    MouseButtonState::Released => self.on_release(),
                }
            }

            InputEvent::PointerLeft => {
                self.set_hovered(None);
                EventResponse::IGNORED
            }

            InputEvent::Resized { width, height } => {
                let b = self.viewport.bounds();
                let bounds = Rect::new(b.left(), b.top(), (width - b.left()).max(0.0), (height - b.top()).max(0.0));
                self.resize(bounds);
                EventResponse::CONSUMED
            }

            InputEvent::Focused(false) => {
                self.drag = None;
                EventResponse::IGNORED
            }

            _ => EventResponse::IGNORED,
        }
    }

    fn on_key(&mut self, key: Key) -> EventResponse {
        let page = self.viewport.page_size() as isize;
        let intent = match key {
            Key::ArrowUp => self.move_selection(|vm| vm.move_selection(-1)).then_some(PlaylistIntent::SelectPrevious),
            Key::ArrowDown => self.move_selection(|vm| vm.move_selection(1)).then_some(PlaylistIntent::SelectNext),
            Key::PageUp => self.selection_intent(|vm| vm.move_selection(-page)),
            Key::PageDown => self.selection_intent(|vm| vm.move_selection(page)),
            Key::Home => self.selection_intent(ViewportModel::select_first),
            Key::End => self.selection_intent(ViewportModel::select_last),
            Key::Enter => self.playable_selection().map(PlaylistIntent::PlaySelected),
            Key::Escape => Some(PlaylistIntent::Stop),
            Key::Space => {
                if self.playback.current.is_some() {
                    Some(PlaylistIntent::Stop)
                } else {
                    self.playable_selection().map(PlaylistIntent::PlaySelected)
                }
            }
            _ => return EventResponse::IGNORED,
        };
        EventResponse::consumed_with(intent)
    }

    /// Applies a selection move and keeps the selection visible.
    fn move_selection(&mut self, f: impl FnOnce(&mut ViewportModel) -> bool) -> bool {
        let moved = f(&mut self.viewport);
        if moved {
            if let Some(sel) = self.viewport.selected() {
                self.track_scroll(|vm| vm.ensure_visible(sel));
            }
            self.needs_redraw = true;
        }
        moved
    }

    fn selection_intent(&mut self, f: impl FnOnce(&mut ViewportModel) -> bool) -> Option<PlaylistIntent> {
        if self.move_selection(f) {
            self.viewport.selected().map(PlaylistIntent::SelectionChanged)
        } else {
            None
        }
    }

    fn playable_selection(&self) -> Option<usize> {
        self.viewport
            .selected()
            .filter(|&i| self.viewport.items().get(i).is_some_and(PlayableItem::is_valid))
    }

    fn pointer_outside(&self) -> bool {
        self.input
            .pointer_pos
            .is_some_and(|(x, y)| !self.viewport.bounds().contains(Vec2::new(x, y)))
    }

    /// Row under `pos`, restricted to the visible list area.
    fn row_at(&self, pos: Vec2) -> Option<usize> {
        if !self.viewport.bounds().contains(pos) {
            return None;
        }
        self.viewport.hit_test(pos.x, pos.y)
    }

    /// Like [`row_at`](Self::row_at) but skipping rows with invalid data.
    fn interactive_row_at(&self, pos: Vec2) -> Option<usize> {
        self.row_at(pos)
            .filter(|&i| self.viewport.items().get(i).is_some_and(PlayableItem::is_valid))
    }

    fn set_hovered(&mut self, row: Option<usize>) {
        if self.hovered != row {
            self.hovered = row;
            self.needs_redraw = true;
        }
    }

    fn on_pointer_moved(&mut self, pos: Vec2) -> EventResponse {
        let row = self.interactive_row_at(pos);
        self.set_hovered(row);

        let Some(mut drag) = self.drag else {
            return if row.is_some() { EventResponse::CONSUMED } else { EventResponse::IGNORED };
        };
        if !self.input.button_down(MouseButton::Left) {
            self.drag = None;
            return EventResponse::IGNORED;
        }

        if !drag.active && drag.origin.distance(pos) > DRAG_THRESHOLD_PX {
            drag.active = true;
            log::trace!("drag started on row {}", drag.from);
        }
        if drag.active {
            let target = self.row_at(pos);
            if target != drag.target {
                drag.target = target;
                self.needs_redraw = true;
            }
        }
        self.drag = Some(drag);
        EventResponse::CONSUMED
    }

    fn on_press(&mut self, pos: Vec2, now: Instant) -> EventResponse {
        if self.row_at(pos).is_none() {
            return EventResponse::IGNORED;
        }
        // Invalid rows swallow the click without selecting.
        let Some(row) = self.interactive_row_at(pos) else {
            return EventResponse::CONSUMED;
        };

        self.drag = Some(DragState { from: row, origin: pos, active: false, target: None });

        let double = self
            .last_click
            .is_some_and(|(prev, at)| prev == row && now.saturating_duration_since(at) <= DOUBLE_CLICK);
        if double {
            self.last_click = None;
            self.move_selection(|vm| vm.select(row));
            return EventResponse::intent(PlaylistIntent::PlaySelected(row));
        }
        self.last_click = Some((row, now));

        let intent = self.selection_intent(|vm| vm.select(row));
        EventResponse::consumed_with(intent)
    }

    fn on_release(&mut self) -> EventResponse {
        let Some(drag) = self.drag.take() else {
            return EventResponse::IGNORED;
        };
        if !drag.active {
            return EventResponse::CONSUMED;
        }
        self.needs_redraw = true;
        match drag.target {
            Some(to) if to != drag.from => {
                log::debug!("drag: move row {} -> {to}", drag.from);
                EventResponse::intent(PlaylistIntent::MoveItem { from: drag.from, to })
            }
            _ => EventResponse::CONSUMED,
        }
    }

    fn interaction(&self) -> InteractionContext {
        let drag = self.drag.filter(|d| d.active);
        InteractionContext {
            selected: self.viewport.selected(),
            hovered: self.hovered,
            drop_target: drag.and_then(|d| d.target),
            is_dragging: drag.is_some(),
        }
    }

    // ── rendering ─────────────────────────────────────────────────────────

    pub fn render(&mut self, surface: &mut dyn Surface) -> FrameOutcome {
        self.render_at(surface, Instant::now())
    }

    /// Resolves states, paints dirty rows and presents one frame.
    ///
    /// A skipped frame is not retried by itself; the next invalidation
    /// repaints everything still dirty.
    pub fn render_at(&mut self, surface: &mut dyn Surface, now: Instant) -> FrameOutcome {
        let interaction = self.interaction();
        let states = self
            .resolver
            .resolve(self.viewport.items(), &self.playback, &interaction, &mut self.dirty);
        let outcome = self
            .compositor
            .render_frame(&self.viewport, states, &mut self.dirty, &mut self.ctx, surface);
        self.needs_redraw = false;

        match outcome {
            FrameOutcome::Presented { rows_painted } => {
                self.clock.tick_at(now);
                self.stats.frames_presented += 1;
                self.stats.rows_painted += rows_painted as u64;
                self.stats.last_rows_painted = rows_painted;
                self.stats.redraw_rate = self.clock.redraw_rate();
            }
            FrameOutcome::Skipped(_) => self.stats.frames_skipped += 1,
        }
        outcome
    }
}
