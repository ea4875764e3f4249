//! A fake show: sample setlist, a playback engine stand-in and a scripted
//! operator.

use std::sync::Arc;

use setlist_engine::input::{
    InputEvent, Key, KeyState, Modifiers, MouseButton, MouseButtonState, MouseWheelDelta, PointerButtonEvent,
    PointerMoveEvent,
};
use setlist_view::event::PlaylistIntent;
use setlist_view::item::PlayableItem;
use setlist_view::state::PlaybackContext;

const TITLES: [&str; 16] = [
    "Overture",
    "Walk-in Loop",
    "Opening Number",
    "The Long Road Home Through the Valley of Echoes",
    "Interlude",
    "Ballad for Strings",
    "Click Cue",
    "Drum Feature",
    "Ça plane pour moi",
    "Crowd Singalong",
    "Blackout",
    "Acoustic Set",
    "Medley",
    "",
    "Encore",
    "Walk-out",
];

/// Builds `count` back-to-back items with a mix of lengths, loops, very
/// short cues and the occasional broken entry.
pub fn sample_setlist(count: usize) -> Arc<[PlayableItem]> {
    let mut t = 0.0;
    (0..count)
        .map(|i| {
            let title = TITLES[i % TITLES.len()];
            let len = match i % 7 {
                3 => 0.3,
                5 => 45.0,
                _ => 150.0 + (i % 5) as f64 * 37.0,
            };
            let loops = match i % 11 {
                1 => -1,
                4 => 3,
                _ => 0,
            };
            let mut item = PlayableItem::new(i as u64 + 1, i as u32 + 1, title, t, t + len).with_loops(loops);
            if i % 29 == 28 {
                // Corrupted region: end before start.
                item.end = item.start - 1.0;
            }
            t += len;
            item
        })
        .collect()
}

/// Walks a timeline through the setlist at `speed` seconds per second.
pub struct PlaybackSim {
    items: Arc<[PlayableItem]>,
    position: Option<f64>,
    speed: f64,
    sync_loss_until: f64,
}

impl PlaybackSim {
    pub fn new(items: Arc<[PlayableItem]>, speed: f64) -> Self {
        Self { items, position: Some(0.0), speed, sync_loss_until: 0.0 }
    }

    pub fn set_items(&mut self, items: Arc<[PlayableItem]>) {
        self.items = items;
    }

    /// Reports lost sync for the next `secs` of show time.
    pub fn lose_sync(&mut self, secs: f64) {
        if let Some(pos) = self.position {
            self.sync_loss_until = pos + secs;
        }
    }

    pub fn advance(&mut self, dt: f64) -> PlaybackContext {
        if let Some(pos) = self.position.as_mut() {
            *pos += dt * self.speed;
        }
        self.context()
    }

    pub fn apply(&mut self, intent: PlaylistIntent) {
        match intent {
            PlaylistIntent::PlaySelected(i) => {
                self.position = self.items.get(i).map(|it| it.start);
            }
            PlaylistIntent::Stop => self.position = None,
            _ => {}
        }
    }

    fn context(&self) -> PlaybackContext {
        let Some(pos) = self.position else {
            return PlaybackContext::default();
        };
        let current = self
            .items
            .iter()
            .position(|it| it.is_valid() && it.start <= pos && pos < it.end);
        let next = current.and_then(|c| (c + 1..self.items.len()).find(|&i| self.items[i].is_valid()));
        PlaybackContext { current, next, sync_loss: current.is_some() && pos < self.sync_loss_until }
    }
}

/// Moves `from` to `to`, renumbering ordinals.
pub fn reorder(items: &[PlayableItem], from: usize, to: usize) -> Arc<[PlayableItem]> {
    let mut list = items.to_vec();
    if from < list.len() && to < list.len() {
        let item = list.remove(from);
        list.insert(to, item);
    }
    for (i, item) in list.iter_mut().enumerate() {
        item.ordinal = i as u32 + 1;
    }
    Arc::from(list)
}

// ── scripted operator ─────────────────────────────────────────────────────

fn key(key: Key) -> InputEvent {
    InputEvent::Key { key, state: KeyState::Pressed, modifiers: Modifiers::default(), repeat: false }
}

fn moved(x: f32, y: f32) -> InputEvent {
    InputEvent::PointerMoved(PointerMoveEvent { x, y })
}

fn button(state: MouseButtonState, x: f32, y: f32) -> InputEvent {
    InputEvent::PointerButton(PointerButtonEvent {
        button: MouseButton::Left,
        state,
        x,
        y,
        modifiers: Modifiers::default(),
    })
}

fn wheel(lines: f32) -> InputEvent {
    InputEvent::MouseWheel { delta: MouseWheelDelta::Line { x: 0.0, y: lines }, modifiers: Modifiers::default() }
}

/// Input the operator produces on `frame`.
pub fn operator_input(frame: u32) -> Vec<InputEvent> {
    match frame {
        40 => vec![moved(200.0, 100.0), wheel(-3.0)],
        60 => vec![wheel(2.0)],
        80 => vec![key(Key::ArrowDown), key(Key::ArrowDown), key(Key::ArrowDown)],
        100 => vec![key(Key::PageDown)],
        120 => vec![moved(150.0, 210.0)],
        130 | 134 => vec![button(MouseButtonState::Pressed, 150.0, 210.0), button(MouseButtonState::Released, 150.0, 210.0)],
        160 => vec![button(MouseButtonState::Pressed, 150.0, 60.0)],
        161 => vec![moved(150.0, 100.0)],
        162 => vec![moved(150.0, 180.0)],
        163 => vec![button(MouseButtonState::Released, 150.0, 180.0)],
        200 => vec![key(Key::Home)],
        240 => vec![key(Key::Escape)],
        250 => vec![key(Key::Enter)],
        280 => vec![InputEvent::Resized { width: 520.0, height: 600.0 }],
        _ => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_has_every_row_kind() {
        let list = sample_setlist(60);
        assert_eq!(list.len(), 60);
        assert!(list.iter().any(PlayableItem::is_short));
        assert!(list.iter().any(|it| it.loops < 0));
        assert!(list.iter().any(|it| !it.is_valid()));
        assert!(list.iter().all(|it| !it.name.is_empty()));
    }

    #[test]
    fn playback_walks_the_timeline() {
        let list = sample_setlist(10);
        let second = list[1].start;
        let mut sim = PlaybackSim::new(list, 1.0);
        assert_eq!(sim.advance(0.0).current, Some(0));
        let ctx = sim.advance(second + 0.1);
        assert_eq!(ctx.current, Some(1));
        assert_eq!(ctx.next, Some(2));
    }

    #[test]
    fn stop_and_play_intents() {
        let list = sample_setlist(10);
        let mut sim = PlaybackSim::new(list, 1.0);
        sim.apply(PlaylistIntent::Stop);
        assert_eq!(sim.advance(1.0), PlaybackContext::default());
        sim.apply(PlaylistIntent::PlaySelected(4));
        assert_eq!(sim.advance(0.0).current, Some(4));
    }

    #[test]
    fn sync_loss_flags_current_only_while_active() {
        let mut sim = PlaybackSim::new(sample_setlist(10), 1.0);
        sim.lose_sync(2.0);
        assert!(sim.advance(1.0).sync_loss);
        assert!(!sim.advance(2.0).sync_loss);
    }

    #[test]
    fn reorder_renumbers() {
        let list = sample_setlist(5);
        let moved = reorder(&list, 0, 3);
        assert_eq!(moved[3].id, list[0].id);
        assert!(moved.iter().enumerate().all(|(i, it)| it.ordinal == i as u32 + 1));
    }
}
