//! Input subsystem.
//!
//! Public API is platform-agnostic and does not expose winit types.
//! Hosts translate platform events into `InputEvent`s (see
//! [`platform::winit`] for the winit adapter) and feed them to the view.

pub mod platform;
mod state;
mod types;

pub use state::InputState;
pub use types::{
    InputEvent,
    Key,
    KeyState,
    Modifiers,
    MouseButton,
    MouseButtonState,
    MouseWheelDelta,
    PointerButtonEvent,
    PointerMoveEvent,
};
