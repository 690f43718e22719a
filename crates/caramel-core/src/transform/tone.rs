//! Point operations: invert and brightness.

use tracing::debug;

use crate::buffer::PixelBuffer;

/// Apply `f` to every color sample, copying alpha through.
fn map_color_samples(buffer: &PixelBuffer, f: impl Fn(u8) -> u8) -> PixelBuffer {
    let channels = buffer.channels() as usize;
    let color = buffer.color_channels();
    let mut samples = buffer.samples().to_vec();
    for px in samples.chunks_exact_mut(channels) {
        for v in &mut px[..color] {
            *v = f(*v);
        }
    }
    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), samples)
}

/// Invert every color sample: `out = 255 - in`.
///
/// Applying it twice gives back the original buffer.
///
/// # Example
///
/// ```
/// use caramel_core::{transform::invert, PixelBuffer};
///
/// let img = PixelBuffer::from_rows(&[[0u8, 128], [255, 64]]).unwrap();
/// let out = invert(&img);
/// assert_eq!(out.samples(), &[255, 127, 0, 191]);
/// ```
pub fn invert(buffer: &PixelBuffer) -> PixelBuffer {
    debug!(width = buffer.width(), height = buffer.height(), channels = buffer.channels(), "invert");
    map_color_samples(buffer, |v| 255 - v)
}

/// Shift every color sample by `value`, saturating at 0 and 255.
pub fn brightness(buffer: &PixelBuffer, value: i32) -> PixelBuffer {
    debug!(value, width = buffer.width(), height = buffer.height(), "brightness");
    if value == 0 {
        return buffer.clone();
    }
    map_color_samples(buffer, |v| (v as i32).saturating_add(value).clamp(0, 255) as u8)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
