/// What the view asks its host to do in response to input.
///
/// Intents are requests; the view never acts on playback itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PlaylistIntent {
    /// Start playback at the given row.
    PlaySelected(usize),
    Stop,
    SelectNext,
    SelectPrevious,
    /// Selection moved to the given row.
    SelectionChanged(usize),
    /// A drag finished: move row `from` to position `to`.
    MoveItem { from: usize, to: usize },
}

/// Result of routing one input event through the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResult {
    /// Event was handled.
    Consumed,
    /// Event was not handled; the host may route it elsewhere.
    Ignored,
}

impl EventResult {
    #[inline]
    pub fn is_consumed(self) -> bool {
        self == EventResult::Consumed
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventResponse {
    pub result: EventResult,
    pub intent: Option<PlaylistIntent>,
}

impl EventResponse {
    pub const IGNORED: Self = Self { result: EventResult::Ignored, intent: None };
    pub const CONSUMED: Self = Self { result: EventResult::Consumed, intent: None };

    pub fn intent(intent: PlaylistIntent) -> Self {
        Self { result: EventResult::Consumed, intent: Some(intent) }
    }

    /// Consumed, carrying `intent` if there is one.
    pub fn consumed_with(intent: Option<PlaylistIntent>) -> Self {
        Self { result: EventResult::Consumed, intent }
    }

    #[inline]
    pub fn is_consumed(&self) -> bool {
        self.result.is_consumed()
    }
}
