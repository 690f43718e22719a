//! Convolution filters: Gaussian blur and sharpen.
//!
//! Both filters run the same "same"-size convolution pass with symmetric
//! reflection at the borders, then round and clamp into `u8`. The kernels
//! used here are point-symmetric, so correlation and convolution coincide
//! and the kernel is applied without flipping.

use tracing::{debug, trace};

use super::{clamp_to_u8, TransformError};
use crate::buffer::PixelBuffer;
use crate::kernel::{ConvolutionKernel, GaussianKernel};

/// Map a possibly out-of-range index onto `0..len` by symmetric reflection.
///
/// The edge sample is repeated (`-1 -> 0`, `len -> len - 1`), and the
/// pattern repeats with period `2 * len` so any offset stays in bounds
/// even when the kernel is wider than the image.
///
/// `len` must be non-zero.
#[inline]
pub fn reflect_index(index: isize, len: usize) -> usize {
    let n = len as isize;
    let period = 2 * n;
    let m = index.rem_euclid(period);
    if m < n {
        m as usize
    } else {
        (period - 1 - m) as usize
    }
}

/// Reflected source indices for each output position and kernel tap.
///
/// Entry `[pos * side + k]` is the source index for tap `k` at `pos`.
fn reflected_taps(len: usize, side: usize, radius: usize) -> Vec<usize> {
    let mut taps = Vec::with_capacity(len * side);
    for pos in 0..len {
        for k in 0..side {
            taps.push(reflect_index(pos as isize + k as isize - radius as isize, len));
        }
    }
    taps
}

/// Convolve the leading `channels` channels of `buffer` with `kernel`.
///
/// Channels past `channels` (typically alpha) are copied unchanged. Each
/// filtered channel is processed independently.
pub fn convolve(buffer: &PixelBuffer, kernel: &ConvolutionKernel, channels: usize) -> PixelBuffer {
    let width = buffer.width() as usize;
    let height = buffer.height() as usize;
    let stride = buffer.channels() as usize;
    let channels = channels.min(stride);
    let side = kernel.side();
    let weights = kernel.weights();
    trace!(width, height, channels, side, "convolve");

    let cols = reflected_taps(width, side, kernel.radius());
    let rows = reflected_taps(height, side, kernel.radius());

    let src = buffer.samples();
    let mut out = src.to_vec();
    let mut acc = vec![0.0f64; channels];

    for y in 0..height {
        let row_taps = &rows[y * side..(y + 1) * side];
        for x in 0..width {
            let col_taps = &cols[x * side..(x + 1) * side];
            acc.fill(0.0);

            for (ky, &sy) in row_taps.iter().enumerate() {
                let kernel_row = &weights[ky * side..(ky + 1) * side];
                let row_base = sy * width;
                for (&kw, &sx) in kernel_row.iter().zip(col_taps) {
                    if kw == 0.0 {
                        continue;
                    }
                    let idx = (row_base + sx) * stride;
                    for (a, &v) in acc.iter_mut().zip(&src[idx..idx + channels]) {
                        *a += kw * v as f64;
                    }
                }
            }

            let dst = (y * width + x) * stride;
            for (o, &a) in out[dst..dst + channels].iter_mut().zip(&acc) {
                *o = clamp_to_u8(a);
            }
        }
    }

    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), out)
}

/// Gaussian blur of every channel (alpha included).
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` if `sigma` is not a positive
/// finite number, or if `radius` exceeds [`crate::kernel::MAX_RADIUS`].
///
/// # Example
///
/// ```
/// use caramel_core::{transform::blur, PixelBuffer};
///
/// // A flat field is unchanged by a normalized kernel.
/// let img = PixelBuffer::filled(4, 4, &[100, 150, 200]).unwrap();
/// assert_eq!(blur(&img, 1, 1.0).unwrap(), img);
/// ```
pub fn blur(buffer: &PixelBuffer, radius: u32, sigma: f64) -> Result<PixelBuffer, TransformError> {
    let kernel = GaussianKernel::build(radius, sigma)?;
    debug!(radius, sigma, width = buffer.width(), height = buffer.height(), "blur");
    if radius == 0 {
        return Ok(buffer.clone());
    }
    Ok(convolve(buffer, &kernel.into(), buffer.channels() as usize))
}

/// Sharpen color channels with the kernel
/// `[[0,-1,0],[-1,4*intensity+1,-1],[0,-1,0]]`.
///
/// Output is clamped to `0..=255` and keeps the input dimensions. Alpha is
/// copied through. Intensity 1 leaves flat regions unchanged; other values
/// scale flat regions by `4 * intensity - 3`.
///
/// # Errors
///
/// Returns `TransformError::InvalidArgument` for a NaN or infinite intensity.
pub fn sharpen(buffer: &PixelBuffer, intensity: f64) -> Result<PixelBuffer, TransformError> {
    if !intensity.is_finite() {
        return Err(TransformError::InvalidArgument(format!(
            "sharpen intensity must be finite, got {intensity}"
        )));
    }
    debug!(intensity, width = buffer.width(), height = buffer.height(), "sharpen");
    let kernel = ConvolutionKernel::sharpen(intensity);
    Ok(convolve(buffer, &kernel, buffer.color_channels()))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: Blurring a constant image is the identity.
        #[test]
        fn prop_blur_flat_identity(
            (w, h) in (1u32..=10, 1u32..=10),
            value in prop::collection::vec(any::<u8>(), 3..=3),
            radius in 0u32..=4,
            sigma in 0.2f64..=6.0,
        ) {
            let img = PixelBuffer::filled(w, h, &value).unwrap();
            prop_assert_eq!(blur(&img, radius, sigma).unwrap(), img);
        }

        /// Property: Sharpen never changes dimensions.
        #[test]
        fn prop_sharpen_preserves_shape(
            (w, h) in (1u32..=10, 1u32..=10),
            intensity in -4.0f64..=4.0,
        ) {
            let size = (w * h) as usize;
            let img = PixelBuffer::new(w, h, 1, (0..size).map(|i| (i * 37 % 256) as u8).collect()).unwrap();
            let out = sharpen(&img, intensity).unwrap();
            prop_assert_eq!((out.width(), out.height(), out.channels()), (w, h, 1));
        }

        /// Property: Reflected indices always land inside the axis.
        #[test]
        fn prop_reflect_in_bounds(index in -1000isize..1000, len in 1usize..50) {
            prop_assert!(reflect_index(index, len) < len);
        }
    }
}
