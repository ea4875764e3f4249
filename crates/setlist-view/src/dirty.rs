//! Per-row repaint bookkeeping.

/// Tracks which row indices need repainting.
///
/// Indices past the tracked length read as dirty, and growing the tracker
/// adds dirty slots, so rows appended to the list are painted without an
/// explicit `mark_dirty`. `full_repaint` is a frame-level flag (the whole
/// buffer, including space below the last row, must be redrawn); it is set by
/// [`mark_all_dirty`](Self::mark_all_dirty) and cleared only by
/// [`finish_frame`](Self::finish_frame).
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    flags: Vec<bool>,
    full_repaint: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for `len` rows, all dirty.
    pub fn with_len(len: usize) -> Self {
        Self { flags: vec![true; len], full_repaint: true }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Grows (new slots dirty) or truncates to exactly `len` slots.
    pub fn resize(&mut self, len: usize) {
        self.flags.resize(len, true);
    }

    pub fn mark_dirty(&mut self, index: usize) {
        if index >= self.flags.len() {
            self.flags.resize(index + 1, true);
        }
        self.flags[index] = true;
    }

    pub fn mark_all_dirty(&mut self) {
        self.flags.fill(true);
        self.full_repaint = true;
    }

    #[inline]
    pub fn is_dirty(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(true)
    }

    #[inline]
    pub fn is_full_repaint(&self) -> bool {
        self.full_repaint
    }

    /// Clears `index` right after its row was painted.
    pub fn clear_after(&mut self, index: usize) {
        if index >= self.flags.len() {
            self.flags.resize(index + 1, true);
        }
        self.flags[index] = false;
    }

    /// Ends a completed full repaint.
    pub fn finish_frame(&mut self) {
        self.full_repaint = false;
    }

    /// Any tracked row dirty, or a full repaint pending.
    pub fn has_dirty(&self) -> bool {
        self.full_repaint || self.flags.iter().any(|&d| d)
    }

    /// Dirty indices within `range`, ascending.
    pub fn dirty_in(&self, range: std::ops::Range<usize>) -> impl Iterator<Item = usize> + '_ {
        range.filter(move |&i| self.is_dirty(i))
    }
}
