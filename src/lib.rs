//! pixelkit - in-memory raster image and animation toolkit
//!
//! This library provides:
//! - Color parsing from names, hex, `rgb()`/`rgba()` and `hsl()`/`hsla()`
//!   notations into packed `0xRRGGBBAA` values
//! - A pixel buffer editor over owned or borrowed byte stores, with flips,
//!   nearest-neighbour resizing, rotation and HSL/RGBA adjustments
//! - Frames and animations that apply editor transforms per frame
//!
//! ```
//! use pixelkit::{Color, PixelBuffer};
//!
//! let mut buffer = PixelBuffer::filled(2, 2, "#f00")?;
//! buffer.set(0, 0, "hsl(240, 100%, 50%)")?.rotate(180.0, false);
//! assert_eq!(buffer.get(1, 1)?, Color::parse("blue")?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod animation;
pub mod buffer;
pub mod color;
pub mod config;
pub mod editor;
pub mod error;
pub mod frame;
pub mod image;

pub use crate::animation::Animation;
pub use crate::color::{Color, ColorError, ColorSpec};
pub use crate::config::Config;
pub use crate::editor::PixelBuffer;
pub use crate::error::EditorError;
pub use crate::frame::Frame;
pub use crate::image::{Codec, Image};
