//! Still images and the codec boundary
//!
//! No file format ships with this crate. [`Image::encode`] and
//! [`Image::decode`] report [`EditorError::Unimplemented`]; plug a format in by
//! implementing [`Codec`] and using [`Image::encode_with`] /
//! [`Image::decode_with`].

use std::ops::{Deref, DerefMut};

use crate::editor::PixelBuffer;
use crate::error::EditorError;

/// Converts pixel buffers to and from an encoded byte representation.
pub trait Codec {
    fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, EditorError>;

    fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, EditorError>;
}

/// A single still picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    buffer: PixelBuffer,
}

impl Image {
    /// Transparent image of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { buffer: PixelBuffer::new(width, height) }
    }

    pub fn encode(&self) -> Result<Vec<u8>, EditorError> {
        Err(EditorError::Unimplemented("image encode"))
    }

    pub fn decode(_bytes: &[u8]) -> Result<Image, EditorError> {
        Err(EditorError::Unimplemented("image decode"))
    }

    pub fn encode_with(&self, codec: &impl Codec) -> Result<Vec<u8>, EditorError> {
        codec.encode(&self.buffer)
    }

    pub fn decode_with(codec: &impl Codec, bytes: &[u8]) -> Result<Image, EditorError> {
        let buffer = codec.decode(bytes)?;
        tracing::debug!(width = buffer.width(), height = buffer.height(), "decoded image");
        Ok(Image::from(buffer))
    }

    pub fn into_buffer(self) -> PixelBuffer {
        self.buffer
    }
}

impl From<PixelBuffer> for Image {
    fn from(buffer: PixelBuffer) -> Self {
        Self { buffer }
    }
}

impl Deref for Image {
    type Target = PixelBuffer;

    fn deref(&self) -> &PixelBuffer {
        &self.buffer
    }
}

impl DerefMut for Image {
    fn deref_mut(&mut self) -> &mut PixelBuffer {
        &mut self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Width and height as big-endian u32s followed by the raw store
    struct RawCodec;

    impl Codec for RawCodec {
        fn encode(&self, buffer: &PixelBuffer) -> Result<Vec<u8>, EditorError> {
            let mut out = Vec::with_capacity(8 + buffer.as_bytes().len());
            out.extend_from_slice(&buffer.width().to_be_bytes());
            out.extend_from_slice(&buffer.height().to_be_bytes());
            out.extend_from_slice(buffer.as_bytes());
            Ok(out)
        }

        fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, EditorError> {
            if bytes.len() < 8 {
                return Err(EditorError::Capacity { width: 0, height: 0, expected: 8, actual: bytes.len() });
            }
            let width = u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
            let height = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
            PixelBuffer::from_vec(width, height, bytes[8..].to_vec())
        }
    }

    #[test]
    fn test_builtin_codec_is_unimplemented() {
        let image = Image::new(1, 1);
        assert_eq!(image.encode(), Err(EditorError::Unimplemented("image encode")));
        assert_eq!(Image::decode(&[]), Err(EditorError::Unimplemented("image decode")));
    }

    #[test]
    fn test_pluggable_codec() {
        let mut image = Image::new(2, 1);
        image.fill("lime").unwrap();
        let bytes = image.encode_with(&RawCodec).unwrap();
        assert_eq!(bytes.len(), 16);

        let decoded = Image::decode_with(&RawCodec, &bytes).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_codec_truncated_header() {
        assert_eq!(
            Image::decode_with(&RawCodec, &[0, 0, 0]),
            Err(EditorError::Capacity { width: 0, height: 0, expected: 8, actual: 3 })
        );
    }

    #[test]
    fn test_codec_capacity_error_propagates() {
        let bytes = [0, 0, 0, 2, 0, 0, 0, 2, 0xFF];
        assert!(matches!(
            Image::decode_with(&RawCodec, &bytes),
            Err(EditorError::Capacity { expected: 16, actual: 1, .. })
        ));
    }
}
