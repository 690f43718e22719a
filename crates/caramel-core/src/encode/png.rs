//! PNG encoding for saving transform results.
//!
//! PNG is lossless, so a saved result decodes back to exactly the samples
//! the transform produced.

use std::io::Cursor;
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use thiserror::Error;
use tracing::debug;

use crate::buffer::PixelBuffer;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// PNG encoding failed
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// Writing the encoded file failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Encode a pixel buffer to PNG bytes.
///
/// One channel is written as 8-bit gray, three as RGB and four as RGBA.
///
/// # Example
///
/// ```
/// use caramel_core::{encode::encode_png, PixelBuffer};
///
/// let img = PixelBuffer::filled(10, 10, &[128, 128, 128]).unwrap();
/// let png = encode_png(&img).unwrap();
///
/// // Verify PNG signature
/// assert_eq!(&png[0..4], &[0x89, b'P', b'N', b'G']);
/// ```
pub fn encode_png(buffer: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    let color = match buffer.channels() {
        1 => ExtendedColorType::L8,
        3 => ExtendedColorType::Rgb8,
        _ => ExtendedColorType::Rgba8,
    };

    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out)
        .write_image(buffer.samples(), buffer.width(), buffer.height(), color)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// Encode a pixel buffer as PNG and write it to `path`.
pub fn write_png(buffer: &PixelBuffer, path: impl AsRef<Path>) -> Result<(), EncodeError> {
    let path = path.as_ref();
    let bytes = encode_png(buffer)?;
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "wrote png");
    Ok(())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
