//! Animation frame: a pixel buffer with a display duration

use std::ops::{Deref, DerefMut};

use crate::editor::PixelBuffer;

/// A [`PixelBuffer`] shown for `duration` time units.
///
/// Derefs to the buffer, so every editor transform applies to a frame directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    buffer: PixelBuffer,
    duration: u32,
}

impl Frame {
    pub fn new(buffer: PixelBuffer, duration: u32) -> Self {
        Self { buffer, duration }
    }

    /// Frame with zero duration.
    pub fn of(buffer: PixelBuffer) -> Self {
        Self::new(buffer, 0)
    }

    pub fn duration(&self) -> u32 {
        self.duration
    }

    pub fn set_duration(&mut self, duration: u32) -> &mut Self {
        self.duration = duration;
        self
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

impl From<PixelBuffer> for Frame {
    fn from(buffer: PixelBuffer) -> Self {
        Frame::of(buffer)
    }
}

impl Deref for Frame {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl DerefMut for Frame {
    fn deref_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}
