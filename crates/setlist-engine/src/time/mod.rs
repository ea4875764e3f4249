//! Frame timing.
//!
//! One `FrameClock` per view: call `tick()` once per presented frame to get a
//! `FrameTime` and keep the rolling redraw rate current.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
