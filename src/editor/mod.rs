//! Packed pixel buffer editor
//!
//! [`PixelBuffer`] owns (or borrows) a row-major store of big-endian packed
//! `0xRRGGBBAA` pixels and exposes builder-style transforms that mutate in place
//! and return `&mut Self` for chaining:
//!
//! ```
//! use pixelkit::editor::PixelBuffer;
//!
//! let mut buffer = PixelBuffer::new(4, 2);
//! buffer.fill("navy")?.flip_horizontal().rotate(90.0, false);
//! assert_eq!(buffer.dimensions(), (2, 4));
//! # Ok::<(), pixelkit::error::EditorError>(())
//! ```
//!
//! Read-only operations work for any `S: AsRef<[u8]>`, in-place mutation for
//! `S: AsMut<[u8]>` as well. Operations that change the dimensions (resize,
//! scale, rotation) need an owned `Vec<u8>` store, which they swap together
//! with the new width and height.

mod adjust;
mod geometry;
mod interpolate;

use std::iter::FusedIterator;

use image::RgbaImage;

use crate::buffer::{self, read_word, write_word, BYTES_PER_PIXEL};
use crate::color::{Color, ColorSpec};
use crate::error::EditorError;

pub use adjust::{InvertMode, ModifyMode};

/// A `width x height` grid of packed RGBA pixels over a byte store `S`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer<S = Vec<u8>> {
    width: u32,
    height: u32,
    store: S,
}

impl PixelBuffer {
    /// Create a zero-filled (transparent) buffer.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, store: vec![0; buffer::required_len(width, height)] }
    }

    /// Create a buffer filled with a single color.
    pub fn filled(width: u32, height: u32, color: impl Into<ColorSpec>) -> Result<Self, EditorError> {
        let mut out = Self::new(width, height);
        out.fill(color)?;
        Ok(out)
    }

    /// Take ownership of an existing byte vector without copying.
    pub fn from_vec(width: u32, height: u32, bytes: Vec<u8>) -> Result<Self, EditorError> {
        Self::wrap(width, height, bytes)
    }

    /// Adopt an [`RgbaImage`]'s pixels. RGBA8 row-major is already the packed
    /// big-endian layout, so no pixel is copied.
    pub fn from_rgba_image(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        let mut store = image.into_raw();
        store.truncate(buffer::required_len(width, height));
        Self { width, height, store }
    }

    /// Swap in a new store together with its dimensions.
    fn replace_store(&mut self, width: u32, height: u32, store: Vec<u8>) {
        debug_assert_eq!(store.len(), buffer::required_len(width, height));
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            width,
            height,
            "replacing pixel store"
        );
        self.width = width;
        self.height = height;
        self.store = store;
    }
}

impl<S: AsRef<[u8]>> PixelBuffer<S> {
    /// Wrap an existing byte store without copying.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::Capacity`] unless the store holds exactly
    /// `4 * width * height` bytes.
    pub fn wrap(width: u32, height: u32, store: S) -> Result<Self, EditorError> {
        buffer::check_capacity(width, height, store.as_ref().len())?;
        Ok(Self { width, height, store })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels.
    pub fn size(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// The byte view of the store.
    pub fn as_bytes(&self) -> &[u8] {
        self.store.as_ref()
    }

    /// The pixel view of the store, in row-major order.
    pub fn pixels(&self) -> impl ExactSizeIterator<Item = u32> + '_ {
        self.as_bytes()
            .chunks_exact(BYTES_PER_PIXEL)
            .map(|px| u32::from_be_bytes([px[0], px[1], px[2], px[3]]))
    }

    /// Packed pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer. Use [`get`](Self::get)
    /// for a checked read.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> u32 {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        read_word(self.as_bytes(), self.index(x, y))
    }

    /// Packed pixel at linear row-major `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](Self::size).
    #[inline]
    pub fn pixel_at(&self, index: usize) -> u32 {
        read_word(self.as_bytes(), index)
    }

    /// Checked read of the color at `(x, y)`.
    pub fn get(&self, x: u32, y: u32) -> Result<Color, EditorError> {
        self.check_bounds(x, y)?;
        Ok(Color(read_word(self.as_bytes(), self.index(x, y))))
    }

    /// Every `(x, y)` coordinate in row-major order. Each call starts over.
    pub fn positions(&self) -> Positions {
        Positions::new(self.width, self.height)
    }

    /// Copy the rectangle `[x1, x2) x [y1, y2)` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::InvalidRegion`] when the rectangle is empty,
    /// inverted or reaches past the buffer.
    #[tracing::instrument(level = "debug", skip_all, fields(width = self.width, height = self.height))]
    pub fn crop(&self, (x1, y1): (u32, u32), (x2, y2): (u32, u32)) -> Result<PixelBuffer, EditorError> {
        if x1 >= x2 || y1 >= y2 {
            return Err(EditorError::InvalidRegion(
                "ending point must be larger than the starting point".to_string(),
            ));
        }
        if x2 > self.width || y2 > self.height {
            return Err(EditorError::InvalidRegion(format!(
                "({x2}, {y2}) exceeds {}x{} buffer",
                self.width, self.height
            )));
        }

        let mut out = PixelBuffer::new(x2 - x1, y2 - y1);
        let row_len = (x2 - x1) as usize * BYTES_PER_PIXEL;
        let src = self.as_bytes();
        for (row, y) in (y1..y2).enumerate() {
            let start = self.index(x1, y) * BYTES_PER_PIXEL;
            let dst = row * row_len;
            out.store[dst..dst + row_len].copy_from_slice(&src[start..start + row_len]);
        }
        Ok(out)
    }

    /// Deep copy into an owned buffer, whatever the store type.
    pub fn to_buffer(&self) -> PixelBuffer {
        PixelBuffer { width: self.width, height: self.height, store: self.as_bytes().to_vec() }
    }

    /// Copy the pixels into an [`RgbaImage`].
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut image = RgbaImage::new(self.width, self.height);
        image.copy_from_slice(self.as_bytes());
        image
    }

    /// Release the backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        x as usize + y as usize * self.width as usize
    }

    fn check_bounds(&self, x: u32, y: u32) -> Result<(), EditorError> {
        if x >= self.width || y >= self.height {
            return Err(EditorError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok(())
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> PixelBuffer<S> {
    /// Mutable byte view of the store.
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.store.as_mut()
    }

    /// Write a packed pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate is outside the buffer. Use [`set`](Self::set)
    /// for a checked write.
    #[inline]
    pub fn put_pixel(&mut self, x: u32, y: u32, value: u32) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let index = self.index(x, y);
        write_word(self.store.as_mut(), index, value);
    }

    /// Write a packed pixel at linear row-major `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is not below [`size`](Self::size).
    #[inline]
    pub fn set_pixel_at(&mut self, index: usize, value: u32) {
        write_word(self.store.as_mut(), index, value);
    }

    /// Checked write of a color-like value at `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, value: impl Into<ColorSpec>) -> Result<&mut Self, EditorError> {
        self.check_bounds(x, y)?;
        let color = value.into().resolve()?;
        let index = self.index(x, y);
        write_word(self.store.as_mut(), index, color.value());
        Ok(self)
    }

    /// Broadcast one color to every pixel.
    pub fn fill(&mut self, value: impl Into<ColorSpec>) -> Result<&mut Self, EditorError> {
        let packed = value.into().resolve()?.value().to_be_bytes();
        for px in self.store.as_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&packed);
        }
        Ok(self)
    }

    /// Fill each pixel from `source(x, y)`, visited in row-major order.
    ///
    /// Results are staged and only committed once every value has parsed, so an
    /// error leaves the buffer untouched.
    pub fn fill_with<F, C>(&mut self, mut source: F) -> Result<&mut Self, EditorError>
    where
        F: FnMut(u32, u32) -> C,
        C: Into<ColorSpec>,
    {
        let mut staged = Vec::with_capacity(self.as_bytes().len());
        for (x, y) in self.positions() {
            let color = source(x, y).into().resolve()?;
            staged.extend_from_slice(&color.value().to_be_bytes());
        }
        self.store.as_mut().copy_from_slice(&staged);
        Ok(self)
    }

    /// Replace each pixel with `source(color, x, y)`.
    ///
    /// The callback always sees the contents from before this pass; outputs are
    /// committed together after the last pixel.
    pub fn map<F, C>(&mut self, mut source: F) -> Result<&mut Self, EditorError>
    where
        F: FnMut(Color, u32, u32) -> C,
        C: Into<ColorSpec>,
    {
        let mut staged = Vec::with_capacity(self.as_bytes().len());
        for ((x, y), current) in self.positions().zip(self.pixels()) {
            let color = source(Color(current), x, y).into().resolve()?;
            staged.extend_from_slice(&color.value().to_be_bytes());
        }
        self.store.as_mut().copy_from_slice(&staged);
        Ok(self)
    }

    /// Infallible per-pixel rewrite of packed values.
    pub(crate) fn map_packed(&mut self, mut f: impl FnMut(u32) -> u32) -> &mut Self {
        for px in self.store.as_mut().chunks_exact_mut(BYTES_PER_PIXEL) {
            let value = f(u32::from_be_bytes([px[0], px[1], px[2], px[3]]));
            px.copy_from_slice(&value.to_be_bytes());
        }
        self
    }

    /// Copy `source` into this buffer with its top-left corner at `(x1, y1)`.
    /// Pixels falling outside this buffer are dropped.
    pub fn place<T: AsRef<[u8]>>(&mut self, source: &PixelBuffer<T>, (x1, y1): (u32, u32)) -> &mut Self {
        let x_end = u64::from(x1).saturating_add(u64::from(source.width)).min(u64::from(self.width));
        let y_end = u64::from(y1).saturating_add(u64::from(source.height)).min(u64::from(self.height));
        if u64::from(x1) >= x_end || u64::from(y1) >= y_end {
            return self;
        }

        let row_len = (x_end - u64::from(x1)) as usize * BYTES_PER_PIXEL;
        let src = source.as_bytes();
        for y in y1..y_end as u32 {
            let from = source.index(0, y - y1) * BYTES_PER_PIXEL;
            let to = self.index(x1, y) * BYTES_PER_PIXEL;
            self.store.as_mut()[to..to + row_len].copy_from_slice(&src[from..from + row_len]);
        }
        self
    }
}

/// Row-major `(x, y)` coordinates of a `width x height` grid.
#[derive(Debug, Clone)]
pub struct Positions {
    width: u32,
    next: u64,
    end: u64,
}

impl Positions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, next: 0, end: u64::from(width) * u64::from(height) }
    }
}

impl Iterator for Positions {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let width = u64::from(self.width);
        let item = ((self.next % width) as u32, (self.next / width) as u32);
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Positions {}

impl FusedIterator for Positions {}
