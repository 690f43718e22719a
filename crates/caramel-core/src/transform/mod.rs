//! Pixel transforms: the seven single-shot operations over a [`PixelBuffer`].
//!
//! Every transform borrows its input and allocates a new output buffer, so
//! callers can keep the original around for undo or comparison.
//!
//! # Channel handling
//!
//! - Point operations (invert, brightness) and sharpen touch color channels
//!   only; alpha is copied through.
//! - Blur, flip and rotate treat every channel alike.
//! - Grayscale drops alpha and produces a single channel.
//!
//! # Boundary policy
//!
//! Convolutions synthesize out-of-bounds neighbors by symmetric reflection
//! (`.. 1 0 | 0 1 2 .. n-1 | n-1 n-2 ..`), and output dimensions always
//! match the input.
//!
//! [`PixelBuffer`]: crate::PixelBuffer

mod filter;
mod grayscale;
mod orient;
mod tone;

use thiserror::Error;

use crate::buffer::BufferError;

pub use filter::{blur, convolve, reflect_index, sharpen};
pub use grayscale::grayscale;
pub use orient::{flip, rotate, FlipAxis, QuarterTurn};
pub use tone::{brightness, invert};

/// Errors raised by transforms and their parameter parsing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A numeric or named parameter is out of its accepted domain.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The input buffer doesn't have a channel layout this transform accepts.
    #[error("Invalid shape: expected {expected}, got {actual} channel(s)")]
    InvalidShape { expected: &'static str, actual: u8 },

    /// Building the output buffer failed.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Round to nearest and saturate into the 8-bit sample range.
#[inline]
pub(crate) fn clamp_to_u8(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}
