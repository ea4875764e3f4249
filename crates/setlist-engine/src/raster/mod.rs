//! CPU rasterization.
//!
//! Responsibilities:
//! - own pixel storage with fallible allocation (`PixelBuffer`)
//! - rasterize the handful of anti-aliased shapes the list needs
//!   (rects, rounded rects, circles, triangles, lines, coverage masks)
//!
//! Every drawing call takes an explicit clip rect; nothing is drawn outside
//! `clip ∩ buffer bounds`.

mod pixmap;
mod shapes;

pub use pixmap::{AllocError, PixelBuffer, MAX_DIMENSION};
