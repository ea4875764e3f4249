use crate::raster::PixelBuffer;

use super::{PresentError, Surface};

/// Surface that copies every presented frame into memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    presents: u64,
    last: Option<PixelBuffer>,
    fail_next: bool,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn present_count(&self) -> u64 {
        self.presents
    }

    pub fn last_frame(&self) -> Option<&PixelBuffer> {
        self.last.as_ref()
    }

    /// Makes the next `present` fail with [`PresentError::Lost`].
    pub fn fail_next_present(&mut self) {
        self.fail_next = true;
    }
}

impl Surface for MemorySurface {
    fn present(&mut self, frame: &PixelBuffer) -> Result<(), PresentError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(PresentError::Lost);
        }
        match self.last.as_mut() {
            Some(prev) if prev.dimensions() == frame.dimensions() => prev.clone_from(frame),
            _ => self.last = Some(frame.clone()),
        }
        self.presents += 1;
        Ok(())
    }
}
