//! Per-row visual state from playback and interaction context.

use crate::dirty::DirtyTracker;
use crate::item::PlayableItem;

/// What the playback engine reports for the current frame.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct PlaybackContext {
    pub current: Option<usize>,
    pub next: Option<usize>,
    /// Playback lost sync with the setlist; flags the current row.
    pub sync_loss: bool,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct InteractionContext {
    pub selected: Option<usize>,
    pub hovered: Option<usize>,
    pub drop_target: Option<usize>,
    pub is_dragging: bool,
}

/// Row emphasis, highest priority first.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Emphasis {
    SyncLoss,
    Playing,
    Next,
    Selected,
    Hovered,
    Normal,
}

#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VisualState {
    pub is_playing: bool,
    pub is_next: bool,
    pub is_selected: bool,
    pub is_hovered: bool,
    pub is_sync_loss: bool,
    pub has_infinite_loop: bool,
    pub loop_count: u32,
}

impl VisualState {
    pub fn needs_status_icon(&self) -> bool {
        self.is_playing || self.is_next || self.is_sync_loss
    }

    /// The single emphasis that decides background and text colors.
    pub fn emphasis(&self) -> Emphasis {
        if self.is_sync_loss {
            Emphasis::SyncLoss
        } else if self.is_playing {
            Emphasis::Playing
        } else if self.is_next {
            Emphasis::Next
        } else if self.is_selected {
            Emphasis::Selected
        } else if self.is_hovered {
            Emphasis::Hovered
        } else {
            Emphasis::Normal
        }
    }
}

/// Splits a stored loop count into `(infinite, count)`.
pub fn normalize_loops(stored: i32) -> (bool, u32) {
    (stored < 0, stored.unsigned_abs())
}

/// Recomputes [`VisualState`]s each frame and feeds changes into the
/// [`DirtyTracker`].
///
/// When `current` or `next` moves, both the previously and newly affected
/// rows are marked. Any other row whose state differs from the last frame is
/// marked as well, so hover and selection changes repaint without extra
/// bookkeeping in the caller.
#[derive(Debug, Default)]
pub struct ItemStateResolver {
    prev_playback: PlaybackContext,
    states: Vec<VisualState>,
}

impl ItemStateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// States from the most recent [`resolve`](Self::resolve).
    pub fn states(&self) -> &[VisualState] {
        &self.states
    }

    pub fn resolve(
        &mut self,
        items: &[PlayableItem],
        playback: &PlaybackContext,
        interaction: &InteractionContext,
        dirty: &mut DirtyTracker,
    ) -> &[VisualState] {
        let n = items.len();
        let mut mark = |i: Option<usize>| {
            if let Some(i) = i.filter(|&i| i < n) {
                dirty.mark_dirty(i);
            }
        };

        let prev = self.prev_playback;
        if prev.current != playback.current || prev.sync_loss != playback.sync_loss {
            mark(prev.current);
            mark(playback.current);
        }
        if prev.next != playback.next {
            mark(prev.next);
            mark(playback.next);
        }
        self.prev_playback = *playback;

        let mut next_states = Vec::with_capacity(n);
        for (i, item) in items.iter().enumerate() {
            let state = Self::state_for(i, item, playback, interaction);
            if self.states.get(i) != Some(&state) {
                dirty.mark_dirty(i);
            }
            next_states.push(state);
        }
        self.states = next_states;
        &self.states
    }

    fn state_for(
        i: usize,
        item: &PlayableItem,
        playback: &PlaybackContext,
        interaction: &InteractionContext,
    ) -> VisualState {
        let is_playing = playback.current == Some(i);
        let interactive = item.is_valid();
        let drop_hover = interaction.is_dragging && interaction.drop_target == Some(i);
        let (has_infinite_loop, loop_count) = normalize_loops(item.loops);

        VisualState {
            is_playing,
            is_next: playback.next == Some(i) && !is_playing,
            is_selected: interactive && interaction.selected == Some(i),
            is_hovered: interactive && (interaction.hovered == Some(i) || drop_hover),
            is_sync_loss: is_playing && playback.sync_loss,
            has_infinite_loop,
            loop_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items(n: usize) -> Vec<PlayableItem> {
        (0..n)
            .map(|i| PlayableItem::new(i as u64, i as u32 + 1, format!("S{i}"), 0.0, 10.0))
            .collect()
    }

    fn clean(n: usize) -> DirtyTracker {
        let mut d = DirtyTracker::with_len(n);
        for i in 0..n {
            d.clear_after(i);
        }
        d.finish_frame();
        d
    }

    // ── loops ─────────────────────────────────────────────────────────────

    #[test]
    fn loop_normalization() {
        assert_eq!(normalize_loops(-2), (true, 2));
        assert_eq!(normalize_loops(3), (false, 3));
        assert_eq!(normalize_loops(0), (false, 0));
        assert_eq!(normalize_loops(i32::MIN), (true, 2_147_483_648));
    }

    #[test]
    fn resolved_state_carries_loops() {
        let mut list = items(2);
        list[0].loops = -2;
        list[1].loops = 3;
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        let s = r.resolve(&list, &PlaybackContext::default(), &InteractionContext::default(), &mut d);
        assert!(s[0].has_infinite_loop && s[0].loop_count == 2);
        assert!(!s[1].has_infinite_loop && s[1].loop_count == 3);
    }

    // ── priority ──────────────────────────────────────────────────────────

    #[test]
    fn emphasis_priority_order() {
        let all = VisualState {
            is_playing: true,
            is_next: true,
            is_selected: true,
            is_hovered: true,
            is_sync_loss: true,
            ..Default::default()
        };
        assert_eq!(all.emphasis(), Emphasis::SyncLoss);
        assert_eq!(VisualState { is_sync_loss: false, ..all }.emphasis(), Emphasis::Playing);
        assert_eq!(VisualState { is_selected: true, is_hovered: true, ..Default::default() }.emphasis(), Emphasis::Selected);
        assert_eq!(VisualState { is_hovered: true, ..Default::default() }.emphasis(), Emphasis::Hovered);
        assert_eq!(VisualState::default().emphasis(), Emphasis::Normal);
    }

    #[test]
    fn status_icon_only_for_playback_states() {
        assert!(VisualState { is_next: true, ..Default::default() }.needs_status_icon());
        assert!(!VisualState { is_selected: true, ..Default::default() }.needs_status_icon());
    }

    #[test]
    fn at_most_one_row_is_playing() {
        let list = items(8);
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        for current in [None, Some(0), Some(7), Some(3), Some(99)] {
            let pb = PlaybackContext { current, next: Some(4), sync_loss: false };
            let s = r.resolve(&list, &pb, &InteractionContext::default(), &mut d);
            assert!(s.iter().filter(|v| v.is_playing).count() <= 1);
        }
    }

    #[test]
    fn sync_loss_flags_only_current_row() {
        let list = items(3);
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        let pb = PlaybackContext { current: Some(1), next: Some(2), sync_loss: true };
        let s = r.resolve(&list, &pb, &InteractionContext::default(), &mut d);
        assert!(s[1].is_sync_loss);
        assert!(!s[2].is_sync_loss);
    }

    #[test]
    fn drop_target_shows_as_hover_while_dragging() {
        let list = items(4);
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        let ix = InteractionContext { drop_target: Some(2), is_dragging: true, ..Default::default() };
        assert!(r.resolve(&list, &PlaybackContext::default(), &ix, &mut d)[2].is_hovered);

        let ix = InteractionContext { drop_target: Some(2), is_dragging: false, ..Default::default() };
        assert!(!r.resolve(&list, &PlaybackContext::default(), &ix, &mut d)[2].is_hovered);
    }

    #[test]
    fn invalid_rows_ignore_interaction() {
        let mut list = items(2);
        list[1].end = -1.0;
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        let ix = InteractionContext { selected: Some(1), hovered: Some(1), ..Default::default() };
        let s = r.resolve(&list, &PlaybackContext::default(), &ix, &mut d);
        assert!(!s[1].is_selected && !s[1].is_hovered);
    }

    // ── dirty feed ────────────────────────────────────────────────────────

    #[test]
    fn current_change_marks_old_and_new_rows() {
        let list = items(10);
        let mut r = ItemStateResolver::new();
        let mut d = DirtyTracker::new();
        let ix = InteractionContext::default();
        r.resolve(&list, &PlaybackContext { current: Some(2), ..Default::default() }, &ix, &mut d);

        let mut d = clean(10);
        r.resolve(&list, &PlaybackContext { current: Some(5), ..Default::default() }, &ix, &mut d);
        assert_eq!(d.dirty_in(0..10).collect::<Vec<_>>(), vec![2, 5]);
    }

    #[test]
    fn unchanged_context_marks_nothing() {
        let list = items(6);
        let mut r = ItemStateResolver::new();
        let pb = PlaybackContext { current: Some(1), next: Some(2), sync_loss: false };
        let ix = InteractionContext { selected: Some(4), ..Default::default() };
        r.resolve(&list, &pb, &ix, &mut DirtyTracker::new());

        let mut d = clean(6);
        r.resolve(&list, &pb, &ix, &mut d);
        assert!(!d.has_dirty());
    }

    #[test]
    fn hover_move_marks_both_rows() {
        let list = items(6);
        let mut r = ItemStateResolver::new();
        let pb = PlaybackContext::default();
        r.resolve(&list, &pb, &InteractionContext { hovered: Some(1), ..Default::default() }, &mut DirtyTracker::new());

        let mut d = clean(6);
        r.resolve(&list, &pb, &InteractionContext { hovered: Some(3), ..Default::default() }, &mut d);
        assert_eq!(d.dirty_in(0..6).collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn stale_indices_do_not_grow_tracker() {
        let list = items(3);
        let mut r = ItemStateResolver::new();
        let ix = InteractionContext::default();
        r.resolve(&list, &PlaybackContext { current: Some(2), ..Default::default() }, &ix, &mut DirtyTracker::new());

        let mut d = clean(2);
        r.resolve(&list[..2], &PlaybackContext { current: Some(40), ..Default::default() }, &ix, &mut d);
        assert_eq!(d.len(), 2);
    }
}
