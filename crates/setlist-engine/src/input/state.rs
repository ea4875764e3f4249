use std::collections::HashSet;

use super::types::{InputEvent, Modifiers, MouseButton, MouseButtonState, PointerButtonEvent, PointerMoveEvent};

/// Input state tracked between events for one host surface.
///
/// Platform adapters need it because some hosts (winit 0.30) deliver button
/// and wheel events without a position or modifier snapshot.
#[derive(Debug, Default)]
pub struct InputState {
    pub modifiers: Modifiers,
    pub focused: bool,
    /// Pointer position in logical pixels; `None` when outside the surface.
    pub pointer_pos: Option<(f32, f32)>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    pub fn apply_event(&mut self, ev: &InputEvent) {
        match ev {
            InputEvent::ModifiersChanged(m) => self.modifiers = *m,

            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Avoid stuck buttons when focus changes mid-press.
                    self.buttons_down.clear();
                }
            }

            InputEvent::PointerMoved(PointerMoveEvent { x, y }) => {
                self.pointer_pos = Some((*x, *y));
            }

            InputEvent::PointerLeft => self.pointer_pos = None,

            InputEvent::Key { modifiers, .. } | InputEvent::MouseWheel { modifiers, .. } => {
                self.modifiers = *modifiers;
            }

            InputEvent::PointerButton(PointerButtonEvent { button, state, x, y, modifiers }) => {
                self.pointer_pos = Some((*x, *y));
                self.modifiers = *modifiers;
                match state {
                    MouseButtonState::Pressed => {
                        self.buttons_down.insert(*button);
                    }
                    MouseButtonState::Released => {
                        self.buttons_down.remove(button);
                    }
                }
            }

            InputEvent::Resized { .. } => {}
        }
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(state: MouseButtonState) -> InputEvent {
        InputEvent::PointerButton(PointerButtonEvent {
            button: MouseButton::Left,
            state,
            x: 4.0,
            y: 9.0,
            modifiers: Modifiers::default(),
        })
    }

    #[test]
    fn button_press_and_release_track_down_set() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButtonState::Pressed));
        assert!(s.button_down(MouseButton::Left));
        assert_eq!(s.pointer_pos, Some((4.0, 9.0)));
        s.apply_event(&press(MouseButtonState::Released));
        assert!(!s.button_down(MouseButton::Left));
    }

    #[test]
    fn focus_loss_releases_buttons() {
        let mut s = InputState::default();
        s.apply_event(&press(MouseButtonState::Pressed));
        s.apply_event(&InputEvent::Focused(false));
        assert!(s.buttons_down.is_empty());
    }

    #[test]
    fn pointer_left_forgets_position() {
        let mut s = InputState::default();
        s.apply_event(&InputEvent::PointerMoved(PointerMoveEvent { x: 1.0, y: 2.0 }));
        s.apply_event(&InputEvent::PointerLeft);
        assert_eq!(s.pointer_pos, None);
    }
}
