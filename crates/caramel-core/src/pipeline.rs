//! Source → transform → sink driver.
//!
//! Picking a file and previewing or saving a result are interactive
//! concerns that live outside this crate. They plug in through
//! [`ImageSource`] and [`ImageSink`]. A user cancelling at any step is a
//! normal outcome, not an error.

use std::path::PathBuf;

use thiserror::Error;
use tracing::{debug, info};

use crate::buffer::PixelBuffer;
use crate::decode::DecodeError;
use crate::encode::EncodeError;
use crate::operation::Operation;
use crate::transform::TransformError;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The selected image could not be decoded.
    #[error("failed to load image: {0}")]
    Decode(#[from] DecodeError),

    /// The transform rejected its input or parameters.
    #[error("transform failed: {0}")]
    Transform(#[from] TransformError),

    /// Writing the result failed.
    #[error("failed to save image: {0}")]
    Encode(#[from] EncodeError),

    /// Interactive I/O (prompts, dialogs) failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Yields the image to transform.
pub trait ImageSource {
    /// Let the user pick an image and decode it.
    ///
    /// Returns `Ok(None)` when the user cancels the selection.
    fn select_and_decode(&mut self) -> Result<Option<PixelBuffer>, PipelineError>;
}

/// Result of offering a buffer to an [`ImageSink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The image was written to this path.
    Saved(PathBuf),
    /// The user declined or cancelled the save.
    Declined,
}

/// Receives the transformed image.
pub trait ImageSink {
    /// Show `buffer` and, if the user confirms, persist it.
    fn preview_and_maybe_save(&mut self, buffer: &PixelBuffer) -> Result<SaveOutcome, PipelineError>;
}

/// How a pipeline run ended without error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// No image was selected.
    Cancelled,
    /// The result was shown but not saved.
    Declined,
    /// The result was saved to this path.
    Saved(PathBuf),
}

/// Pull one image from `source`, apply `operation`, and offer the result
/// to `sink`.
///
/// The sink is never consulted when the source is cancelled.
pub fn run_pipeline<S, K>(source: &mut S, operation: &Operation, sink: &mut K) -> Result<PipelineOutcome, PipelineError>
where
    S: ImageSource + ?Sized,
    K: ImageSink + ?Sized,
{
    let Some(input) = source.select_and_decode()? else {
        info!("no image selected");
        return Ok(PipelineOutcome::Cancelled);
    };
    debug!(
        width = input.width(),
        height = input.height(),
        channels = input.channels(),
        "loaded input"
    );

    let output = operation.apply(&input)?;
    info!(%operation, width = output.width(), height = output.height(), "applied operation");

    match sink.preview_and_maybe_save(&output)? {
        SaveOutcome::Saved(path) => {
            info!(path = %path.display(), "saved result");
            Ok(PipelineOutcome::Saved(path))
        }
        SaveOutcome::Declined => Ok(PipelineOutcome::Declined),
    }
}

/// In-memory source that yields a fixed buffer, or nothing to simulate a cancel.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    buffer: Option<PixelBuffer>,
}

impl MemorySource {
    pub fn new(buffer: PixelBuffer) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    /// A source whose user always cancels.
    pub fn cancelled() -> Self {
        Self { buffer: None }
    }
}

impl ImageSource for MemorySource {
    fn select_and_decode(&mut self) -> Result<Option<PixelBuffer>, PipelineError> {
        Ok(self.buffer.take())
    }
}

/// In-memory sink that records what it was shown.
///
/// With a save path configured it reports the image as saved there
/// without touching the filesystem; otherwise it declines.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    save_as: Option<PathBuf>,
    previews: Vec<PixelBuffer>,
}

impl MemorySink {
    /// A sink that declines every save.
    pub fn declining() -> Self {
        Self::default()
    }

    /// A sink that accepts every save under `path`.
    pub fn accepting(path: impl Into<PathBuf>) -> Self {
        Self {
            save_as: Some(path.into()),
            previews: Vec::new(),
        }
    }

    /// Buffers previewed so far, oldest first.
    pub fn previews(&self) -> &[PixelBuffer] {
        &self.previews
    }
}

impl ImageSink for MemorySink {
    fn preview_and_maybe_save(&mut self, buffer: &PixelBuffer) -> Result<SaveOutcome, PipelineError> {
        self.previews.push(buffer.clone());
        Ok(match &self.save_as {
            Some(path) => SaveOutcome::Saved(path.clone()),
            None => SaveOutcome::Declined,
        })
    }
}
