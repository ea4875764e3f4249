//! Playable items and snapshot diffing.

/// Shortest duration (seconds) treated as a regular region.
pub const SHORT_REGION_SECS: f64 = 0.5;

/// One row of the setlist.
///
/// `loops` stores the loop count as supplied by the playback engine:
/// negative means "loop forever", the magnitude is the count either way.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayableItem {
    pub id: u64,
    pub ordinal: u32,
    pub name: String,
    pub start: f64,
    pub end: f64,
    pub loops: i32,
}

impl PlayableItem {
    /// Builds an item, substituting a placeholder for a blank name.
    pub fn new(id: u64, ordinal: u32, name: impl Into<String>, start: f64, end: f64) -> Self {
        let name = name.into();
        let name = if name.trim().is_empty() {
            format!("Untitled {ordinal}")
        } else {
            name
        };
        Self { id, ordinal, name, start, end, loops: 0 }
    }

    pub fn with_loops(mut self, loops: i32) -> Self {
        self.loops = loops;
        self
    }

    #[inline]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Whether the row can be drawn and interacted with normally.
    pub fn is_valid(&self) -> bool {
        self.ordinal > 0
            && self.start.is_finite()
            && self.end.is_finite()
            && self.end >= self.start
            && !self.name.trim().is_empty()
    }

    /// Regions this short are easy to miss live; the renderer flags them.
    pub fn is_short(&self) -> bool {
        self.duration() < SHORT_REGION_SECS
    }
}

/// Result of comparing two item snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Indices whose item differs or that only exist in the new snapshot.
    pub changed: Vec<usize>,
    /// The new snapshot is shorter; rows past its end are stale.
    pub shrunk: bool,
}

impl SnapshotDiff {
    pub fn is_unchanged(&self) -> bool {
        self.changed.is_empty() && !self.shrunk
    }
}

pub fn diff_snapshots(prev: &[PlayableItem], next: &[PlayableItem]) -> SnapshotDiff {
    let changed = next
        .iter()
        .enumerate()
        .filter(|&(i, item)| prev.get(i) != Some(item))
        .map(|(i, _)| i)
        .collect();

    SnapshotDiff { changed, shrunk: next.len() < prev.len() }
}
