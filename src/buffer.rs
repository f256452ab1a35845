//! Byte store coercion
//!
//! A [`PixelBuffer`] can sit on top of any contiguous byte store: an owned
//! `Vec<u8>`, a caller's `&mut [u8]`, or a read-only `&[u8]`. Wrapping never
//! copies; it only validates that the store holds exactly `4 * width * height`
//! bytes. Each 4-byte group is one big-endian packed `0xRRGGBBAA` pixel.

use crate::editor::PixelBuffer;
use crate::error::EditorError;

/// Bytes per packed pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// Mutable view over caller-owned memory.
pub type PixelView<'a> = PixelBuffer<&'a mut [u8]>;

/// Read-only view over caller-owned memory.
pub type PixelRef<'a> = PixelBuffer<&'a [u8]>;

/// Byte length a `width x height` store must have. Saturates instead of
/// overflowing so impossible sizes fail the capacity check.
pub fn required_len(width: u32, height: u32) -> usize {
    (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(BYTES_PER_PIXEL)
}

/// Validate that `actual` bytes back a `width x height` buffer.
pub fn check_capacity(width: u32, height: u32, actual: usize) -> Result<usize, EditorError> {
    let expected = required_len(width, height);
    if actual != expected {
        return Err(EditorError::Capacity { width, height, expected, actual });
    }
    Ok(expected)
}

/// Wrap caller memory as a mutable pixel buffer without copying.
///
/// # Examples
///
/// ```
/// use pixelkit::buffer::view;
///
/// let mut bytes = [0u8; 16];
/// let mut pixels = view(&mut bytes, 2, 2).unwrap();
/// pixels.fill("red").unwrap();
/// drop(pixels);
/// assert_eq!(&bytes[..4], &[0xFF, 0x00, 0x00, 0xFF]);
///
/// assert!(view(&mut bytes, 3, 2).is_err());
/// ```
pub fn view(bytes: &mut [u8], width: u32, height: u32) -> Result<PixelView<'_>, EditorError> {
    PixelBuffer::wrap(width, height, bytes)
}

/// Wrap caller memory as a read-only pixel buffer without copying.
pub fn view_ref(bytes: &[u8], width: u32, height: u32) -> Result<PixelRef<'_>, EditorError> {
    PixelBuffer::wrap(width, height, bytes)
}

/// Read the packed pixel at linear `index`.
#[inline]
pub(crate) fn read_word(bytes: &[u8], index: usize) -> u32 {
    let offset = index * BYTES_PER_PIXEL;
    u32::from_be_bytes([bytes[offset], bytes[offset + 1], bytes[offset + 2], bytes[offset + 3]])
}

/// Write the packed pixel at linear `index`.
#[inline]
pub(crate) fn write_word(bytes: &mut [u8], index: usize, value: u32) {
    let offset = index * BYTES_PER_PIXEL;
    bytes[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&value.to_be_bytes());
}

/// Reverse the pixel order of a packed slice, keeping each pixel's bytes intact.
pub(crate) fn reverse_pixels(bytes: &mut [u8]) {
    bytes.reverse();
    for pixel in bytes.chunks_exact_mut(BYTES_PER_PIXEL) {
        pixel.reverse();
    }
}
