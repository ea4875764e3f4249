//! Coordinate and geometry types shared by the rasterizer and the view.
//!
//! Canonical space:
//! - Pixels (the host is expected to hand over already-scaled sizes)
//! - Origin top-left
//! - +X right, +Y down

mod rect;
mod vec2;
mod viewport;

pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
