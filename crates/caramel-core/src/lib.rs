//! Caramel Core - single-shot pixel transforms
//!
//! This crate provides the image model and the seven elementary transforms
//! used by the `caramel` command: invert, brightness, grayscale, Gaussian
//! blur, sharpen, flip and rotate. It also provides the decode/encode glue
//! and the source → transform → sink pipeline those transforms run in.
//!
//! Every transform is a pure function from `&PixelBuffer` to a new
//! `PixelBuffer`; the input is never modified.

pub mod buffer;
pub mod decode;
pub mod encode;
pub mod kernel;
pub mod luminance;
pub mod operation;
pub mod pipeline;
pub mod transform;

pub use buffer::{BufferError, PixelBuffer};
pub use kernel::{ConvolutionKernel, GaussianKernel, MAX_RADIUS};
pub use operation::Operation;
pub use pipeline::{run_pipeline, ImageSink, ImageSource, PipelineError, PipelineOutcome, SaveOutcome};
pub use transform::{FlipAxis, QuarterTurn, TransformError};
