//! Presentation targets.
//!
//! A [`Surface`] receives one finished frame at a time. Hosts implement it
//! over whatever blit their platform offers (softbuffer, a GPU texture
//! upload, an image encoder); [`MemorySurface`] keeps frames in memory.

mod memory;

pub use memory::MemorySurface;

use std::fmt;

use crate::raster::PixelBuffer;

/// Error returned when a host cannot accept a frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PresentError {
    /// Host surface is gone (window closed, minimized to zero size).
    Lost,
    /// Host rejected the frame for a host-specific reason.
    Rejected(String),
}

impl fmt::Display for PresentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresentError::Lost => write!(f, "presentation surface lost"),
            PresentError::Rejected(why) => write!(f, "frame rejected by host: {why}"),
        }
    }
}

impl std::error::Error for PresentError {}

pub trait Surface {
    /// Hands a complete frame to the host in a single blit.
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), PresentError>;
}
