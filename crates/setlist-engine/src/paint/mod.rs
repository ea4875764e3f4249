//! Paint model shared between the rasterizer and the view.
//!
//! Scope:
//! - color representation (straight-alpha sRGB bytes)
//! - color math used by theming (luminance, contrast, blending)
//!
//! Geometry types remain in `coords`.

pub mod color;

pub use color::{Color, ColorParseError};
