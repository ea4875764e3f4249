//! Setlist view: a live, scrollable setlist rendered on the CPU.
//!
//! The pipeline, leaves first:
//!
//! - [`theme`] holds palettes, font sizes and the contrast checks.
//! - [`resources`] memoizes icons and scaled font metrics per `(kind, size)`.
//! - [`renderer`] draws one row.
//! - [`viewport`] does scroll, selection and hit-test math.
//! - [`state`] resolves per-row visual state from playback and interaction.
//! - [`dirty`] tracks which rows need repainting.
//! - [`compositor`] repaints dirty rows off-screen and presents once per frame.
//!
//! [`view::PlaylistView`] ties them together for a host.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use setlist_view::prelude::*;
//!
//! let mut view = PlaylistView::new(
//!     ViewConfig::default(),
//!     Rect::new(0.0, 0.0, 480.0, 640.0),
//!     Box::new(FixedAdvanceText::default()),
//! );
//! view.set_items(items);
//! view.set_playback(PlaybackContext { current: Some(0), next: Some(1), sync_loss: false });
//!
//! // In the host event loop:
//! let response = view.handle_event(&event);
//! if view.needs_redraw() {
//!     view.render(&mut surface);
//! }
//! ```

pub mod compositor;
pub mod config;
pub mod context;
pub mod dirty;
pub mod event;
pub mod item;
pub mod painter;
pub mod renderer;
pub mod resources;
pub mod state;
pub mod theme;
pub mod view;
pub mod viewport;

pub use view::PlaylistView;

/// Everything a host needs to embed the view.
pub mod prelude {
    pub use crate::compositor::{FrameOutcome, SkipReason};
    pub use crate::config::{ItemHeightPreset, ViewConfig};
    pub use crate::event::{EventResponse, EventResult, PlaylistIntent};
    pub use crate::item::PlayableItem;
    pub use crate::state::PlaybackContext;
    pub use crate::theme::{ThemeError, ThemeStore, ThemeVariant};
    pub use crate::view::{FrameStats, PlaylistView};

    pub use setlist_engine::coords::{Rect, Vec2};
    pub use setlist_engine::input::InputEvent;
    pub use setlist_engine::paint::Color;
    pub use setlist_engine::surface::{MemorySurface, Surface};
    pub use setlist_engine::text::{FixedAdvanceText, FontSystem};
}
