//! Editor error taxonomy

use thiserror::Error;

use crate::color::ColorError;

/// Errors raised by pixel buffer construction and transforms
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EditorError {
    /// A color-like value could not be resolved
    #[error(transparent)]
    Color(#[from] ColorError),

    /// Backing store length does not match `4 * width * height`
    #[error("invalid buffer capacity: {width}x{height} needs {expected} bytes, got {actual}")]
    Capacity { width: u32, height: u32, expected: usize, actual: usize },

    /// Coordinate outside `[0, width) x [0, height)`
    #[error("({x}, {y}) out of bounds for {width}x{height} buffer")]
    OutOfBounds { x: u32, y: u32, width: u32, height: u32 },

    /// Rectangle is empty, inverted or exceeds the buffer
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Mode string not recognized
    #[error("unknown {kind} mode '{value}'")]
    UnknownMode { kind: &'static str, value: String },

    /// Feature boundary that is deliberately not implemented
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

impl EditorError {
    pub(crate) fn unknown_mode(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownMode { kind, value: value.into() }
    }
}
