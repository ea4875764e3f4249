use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Seconds since the previous tick, clamped.
    pub dt: f32,
    pub now: Instant,
    pub frame_index: u64,
}

/// Produces `FrameTime` snapshots and measures redraws per second.
///
/// Delta time is clamped so a stall (debugger, minimized window) does not
/// produce pathological values. The redraw rate counts ticks inside a
/// trailing window (one second by default).
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
    window: Duration,
    recent: VecDeque<Instant>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_window(Duration::from_secs(1))
    }

    /// Clock whose redraw rate is measured over `window`.
    pub fn with_window(window: Duration) -> Self {
        Self {
            last: None,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
            window: window.max(Duration::from_millis(1)),
            recent: VecDeque::new(),
        }
    }

    /// Forgets history, e.g. after the view was hidden.
    pub fn reset(&mut self) {
        self.last = None;
        self.recent.clear();
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if a frame were presented at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = match self.last {
            Some(last) => now.saturating_duration_since(last).clamp(self.dt_min, self.dt_max),
            None => self.dt_min,
        };
        self.last = Some(now);

        self.recent.push_back(now);
        while let Some(&front) = self.recent.front() {
            if now.saturating_duration_since(front) >= self.window {
                self.recent.pop_front();
            } else {
                break;
            }
        }

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };
        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }

    /// Frames per second over the trailing window.
    pub fn redraw_rate(&self) -> f32 {
        self.recent.len() as f32 / self.window.as_secs_f32()
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_index
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
