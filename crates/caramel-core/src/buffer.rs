//! In-memory pixel buffer shared by every transform.
//!
//! A [`PixelBuffer`] is always valid once constructed: dimensions are
//! non-zero, the channel count is 1, 3 or 4, and the sample vector has
//! exactly `width * height * channels` bytes.

use image::DynamicImage;
use thiserror::Error;

/// Errors raised when a buffer would violate its shape invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BufferError {
    /// Width or height is zero.
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Channel count is not one of 1, 3 or 4.
    #[error("Unsupported channel count {0}: expected 1 (gray), 3 (RGB) or 4 (RGBA)")]
    UnsupportedChannels(u8),

    /// Sample vector length doesn't match the declared shape.
    #[error("Invalid sample data: expected {expected} bytes (width * height * channels), got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },

    /// Rows passed to `from_rows` differ in length.
    #[error("Ragged rows: expected every row to have {expected} samples, found one with {actual}")]
    RaggedRows { expected: usize, actual: usize },
}

/// A decoded 8-bit image in row-major, interleaved layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: u8,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer, validating shape against the sample data.
    pub fn new(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Result<Self, BufferError> {
        if width == 0 || height == 0 {
            return Err(BufferError::InvalidDimensions { width, height });
        }
        if !matches!(channels, 1 | 3 | 4) {
            return Err(BufferError::UnsupportedChannels(channels));
        }
        let expected = width as usize * height as usize * channels as usize;
        if samples.len() != expected {
            return Err(BufferError::SampleCountMismatch {
                expected,
                actual: samples.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            samples,
        })
    }

    /// Assemble a buffer whose shape the caller has already established,
    /// e.g. a transform output derived from a valid input.
    pub(crate) fn from_parts(width: u32, height: u32, channels: u8, samples: Vec<u8>) -> Self {
        debug_assert_eq!(
            samples.len(),
            width as usize * height as usize * channels as usize,
            "Sample buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            samples,
        }
    }

    /// Create a buffer where every pixel has the same channel values.
    ///
    /// `value` must have exactly `channels` entries.
    pub fn filled(width: u32, height: u32, value: &[u8]) -> Result<Self, BufferError> {
        let channels = u8::try_from(value.len())
            .map_err(|_| BufferError::UnsupportedChannels(u8::MAX))?;
        let count = width as usize * height as usize;
        let samples = value.repeat(count);
        Self::new(width, height, channels, samples)
    }

    /// Create a single-channel buffer from rows of gray values.
    ///
    /// Every row must have the same length as the first.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, BufferError> {
        let first = rows.first().map_or(0, |r| r.as_ref().len());
        if let Some(ragged) = rows.iter().find(|r| r.as_ref().len() != first) {
            return Err(BufferError::RaggedRows {
                expected: first,
                actual: ragged.as_ref().len(),
            });
        }
        let (Ok(width), Ok(height)) = (u32::try_from(first), u32::try_from(rows.len())) else {
            return Err(BufferError::InvalidDimensions {
                width: u32::MAX,
                height: u32::MAX,
            });
        };
        let samples: Vec<u8> = rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect();
        Self::new(width, height, 1, samples)
    }

    /// Image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Interleaved channel count (1, 3 or 4).
    #[inline]
    pub fn channels(&self) -> u8 {
        self.channels
    }

    /// Raw samples in `(row * width + col) * channels + ch` order.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Whether the last channel is alpha.
    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }

    /// Number of leading channels carrying color (alpha excluded).
    #[inline]
    pub fn color_channels(&self) -> usize {
        if self.has_alpha() {
            3
        } else {
            self.channels as usize
        }
    }

    /// Get the total number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Get the size of the sample buffer in bytes.
    pub fn byte_size(&self) -> usize {
        self.samples.len()
    }

    /// Channel values of the pixel at (`row`, `col`), or `None` if out of bounds.
    pub fn pixel(&self, row: u32, col: u32) -> Option<&[u8]> {
        if row >= self.height || col >= self.width {
            return None;
        }
        let c = self.channels as usize;
        let idx = (row as usize * self.width as usize + col as usize) * c;
        Some(&self.samples[idx..idx + c])
    }

    /// Build a buffer from a decoded `image` crate value.
    ///
    /// Gray images stay single-channel, anything with alpha becomes RGBA,
    /// everything else becomes RGB. Deeper bit depths are narrowed to 8 bits.
    pub fn from_dynamic(img: DynamicImage) -> Result<Self, BufferError> {
        let color = img.color();
        let (width, height) = (img.width(), img.height());
        if color.has_alpha() {
            Self::new(width, height, 4, img.into_rgba8().into_raw())
        } else if color.has_color() {
            Self::new(width, height, 3, img.into_rgb8().into_raw())
        } else {
            Self::new(width, height, 1, img.into_luma8().into_raw())
        }
    }

    /// Mean sample value per channel, used for text previews.
    pub fn channel_means(&self) -> Vec<f64> {
        let c = self.channels as usize;
        let mut sums = vec![0u64; c];
        for px in self.samples.chunks_exact(c) {
            for (sum, &v) in sums.iter_mut().zip(px) {
                *sum += v as u64;
            }
        }
        let n = self.pixel_count() as f64;
        sums.into_iter().map(|s| s as f64 / n).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GrayImage, RgbImage, RgbaImage};

    #[test]
    fn test_buffer_creation() {
        let buf = PixelBuffer::new(100, 50, 3, vec![0u8; 100 * 50 * 3]).unwrap();

        assert_eq!(buf.width(), 100);
        assert_eq!(buf.height(), 50);
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.pixel_count(), 5000);
        assert_eq!(buf.byte_size(), 15000);
        assert!(!buf.has_alpha());
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        let err = PixelBuffer::new(0, 10, 1, vec![]).unwrap_err();
        assert_eq!(err, BufferError::InvalidDimensions { width: 0, height: 10 });
    }

    #[test]
    fn test_unsupported_channels_rejected() {
        let err = PixelBuffer::new(2, 2, 2, vec![0; 8]).unwrap_err();
        assert_eq!(err, BufferError::UnsupportedChannels(2));
    }

    #[test]
    fn test_sample_mismatch_rejected() {
        let err = PixelBuffer::new(2, 2, 3, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            BufferError::SampleCountMismatch {
                expected: 12,
                actual: 11
            }
        );
        assert_eq!(
            err.to_string(),
            "Invalid sample data: expected 12 bytes (width * height * channels), got 11"
        );
    }

    #[test]
    fn test_filled_and_pixel_access() {
        let buf = PixelBuffer::filled(4, 4, &[100, 150, 200]).unwrap();
        assert_eq!(buf.channels(), 3);
        assert_eq!(buf.pixel(3, 3), Some(&[100u8, 150, 200][..]));
        assert_eq!(buf.pixel(4, 0), None);
    }

    #[test]
    fn test_from_rows() {
        let buf = PixelBuffer::from_rows(&[[0u8, 128], [255, 64]]).unwrap();
        assert_eq!((buf.width(), buf.height(), buf.channels()), (2, 2, 1));
        assert_eq!(buf.samples(), &[0, 128, 255, 64]);
        assert_eq!(buf.pixel(1, 0), Some(&[255u8][..]));
    }

    #[test]
    fn test_from_rows_ragged_rejected() {
        let rows: Vec<Vec<u8>> = vec![vec![1, 2], vec![3]];
        assert!(PixelBuffer::from_rows(rows.as_slice()).is_err());

        // Same total as a 1x3 image, but the rows disagree.
        let rows: Vec<Vec<u8>> = vec![vec![1], vec![2, 3], vec![]];
        assert_eq!(
            PixelBuffer::from_rows(rows.as_slice()).unwrap_err(),
            BufferError::RaggedRows { expected: 1, actual: 2 }
        );
    }

    #[test]
    fn test_from_rows_empty_rejected() {
        let rows: Vec<Vec<u8>> = Vec::new();
        assert!(matches!(
            PixelBuffer::from_rows(rows.as_slice()),
            Err(BufferError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_color_channels_excludes_alpha() {
        let rgba = PixelBuffer::filled(1, 1, &[1, 2, 3, 4]).unwrap();
        assert!(rgba.has_alpha());
        assert_eq!(rgba.color_channels(), 3);

        let gray = PixelBuffer::filled(1, 1, &[9]).unwrap();
        assert_eq!(gray.color_channels(), 1);
    }

    #[test]
    fn test_from_dynamic_preserves_layout() {
        let gray = GrayImage::from_raw(2, 1, vec![7, 8]).unwrap();
        let buf = PixelBuffer::from_dynamic(DynamicImage::ImageLuma8(gray)).unwrap();
        assert_eq!((buf.channels(), buf.samples()), (1, &[7u8, 8][..]));

        let rgb = RgbImage::from_raw(1, 1, vec![1, 2, 3]).unwrap();
        let buf = PixelBuffer::from_dynamic(DynamicImage::ImageRgb8(rgb)).unwrap();
        assert_eq!((buf.channels(), buf.samples()), (3, &[1u8, 2, 3][..]));

        let rgba = RgbaImage::from_raw(1, 1, vec![1, 2, 3, 4]).unwrap();
        let buf = PixelBuffer::from_dynamic(DynamicImage::ImageRgba8(rgba)).unwrap();
        assert_eq!((buf.channels(), buf.samples()), (4, &[1u8, 2, 3, 4][..]));
    }

    #[test]
    fn test_from_dynamic_luma_alpha_becomes_rgba() {
        let img = DynamicImage::new_luma_a8(2, 2);
        let buf = PixelBuffer::from_dynamic(img).unwrap();
        assert_eq!(buf.channels(), 4);
    }

    #[test]
    fn test_channel_means() {
        let buf = PixelBuffer::new(2, 1, 3, vec![0, 10, 20, 100, 30, 40]).unwrap();
        assert_eq!(buf.channel_means(), vec![50.0, 20.0, 30.0]);
    }
}
