//! Image encoding for saved results.
//!
//! Results are always written as PNG regardless of the input format, so
//! no transform output is degraded by a lossy codec.

mod png;

pub use png::{encode_png, write_png, EncodeError};
