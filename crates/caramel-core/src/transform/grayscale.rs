//! RGB to single-channel gray conversion.

use tracing::debug;

use super::TransformError;
use crate::buffer::PixelBuffer;
use crate::luminance::luma_u8;

/// Convert an RGB or RGBA buffer to one gray channel using BT.601 weights:
/// `round(0.299 R + 0.587 G + 0.114 B)`. Alpha is dropped.
///
/// # Errors
///
/// Returns `TransformError::InvalidShape` when the input has fewer than
/// three channels (i.e. it is already gray).
pub fn grayscale(buffer: &PixelBuffer) -> Result<PixelBuffer, TransformError> {
    let channels = buffer.channels();
    if channels < 3 {
        return Err(TransformError::InvalidShape {
            expected: "3 or 4 channels (RGB/RGBA)",
            actual: channels,
        });
    }
    debug!(width = buffer.width(), height = buffer.height(), channels, "grayscale");

    let samples = buffer
        .samples()
        .chunks_exact(channels as usize)
        .map(|px| luma_u8(px[0], px[1], px[2]))
        .collect();

    Ok(PixelBuffer::from_parts(buffer.width(), buffer.height(), 1, samples))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_output_single_channel() {
        let img = PixelBuffer::filled(5, 3, &[100, 150, 200]).unwrap();
        let out = grayscale(&img).unwrap();
        assert_eq!(out.channels(), 1);
        assert_eq!((out.width(), out.height()), (5, 3));
        assert!(out.samples().iter().all(|&v| v == 141));
    }

    #[test]
    fn test_grayscale_rejects_gray_input() {
        let img = PixelBuffer::filled(2, 2, &[50]).unwrap();
        let err = grayscale(&img).unwrap_err();
        assert_eq!(
            err,
            TransformError::InvalidShape {
                expected: "3 or 4 channels (RGB/RGBA)",
                actual: 1
            }
        );
    }

    #[test]
    fn test_grayscale_ignores_alpha() {
        let opaque = PixelBuffer::filled(1, 1, &[255, 0, 0, 255]).unwrap();
        let clear = PixelBuffer::filled(1, 1, &[255, 0, 0, 0]).unwrap();
        assert_eq!(grayscale(&opaque).unwrap().samples(), &[76]);
        assert_eq!(grayscale(&clear).unwrap().samples(), &[76]);
    }

    #[test]
    fn test_grayscale_per_pixel() {
        let img = PixelBuffer::new(3, 1, 3, vec![255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        assert_eq!(grayscale(&img).unwrap().samples(), &[76, 150, 29]);
    }
}
