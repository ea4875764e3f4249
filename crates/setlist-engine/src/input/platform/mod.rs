//! Host windowing adapters.

pub mod winit;
