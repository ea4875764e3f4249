//! Setlist engine crate.
//!
//! This crate owns the platform-agnostic pieces used by the setlist view:
//! geometry, colors, CPU pixel buffers, text measurement, presentation
//! surfaces, input translation and frame timing.

pub mod input;
pub mod time;
pub mod surface;

pub mod logging;
pub mod coords;
pub mod raster;
pub mod paint;
pub mod text;
