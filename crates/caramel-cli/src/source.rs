//! Image sources: a path given up front, a terminal prompt, or a native
//! file dialog.

use std::path::{Path, PathBuf};

use caramel_core::decode::decode_file;
use caramel_core::{ImageSource, PipelineError, PixelBuffer};
use tracing::debug;

use crate::prompt::Prompter;

fn load(path: &Path) -> Result<PixelBuffer, PipelineError> {
    debug!(path = %path.display(), "decoding input");
    Ok(decode_file(path)?)
}

/// Decodes a path chosen on the command line.
#[derive(Debug)]
pub struct PathSource {
    path: Option<PathBuf>,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

impl ImageSource for PathSource {
    fn select_and_decode(&mut self) -> Result<Option<PixelBuffer>, PipelineError> {
        match self.path.take() {
            Some(path) => load(&path).map(Some),
            None => Ok(None),
        }
    }
}

/// Asks for a path on the terminal; an empty answer cancels.
#[derive(Debug)]
pub struct PromptSource<P> {
    prompter: P,
}

impl<P: Prompter> PromptSource<P> {
    pub fn new(prompter: P) -> Self {
        Self { prompter }
    }
}

impl<P: Prompter> ImageSource for PromptSource<P> {
    fn select_and_decode(&mut self) -> Result<Option<PixelBuffer>, PipelineError> {
        let answer = self.prompter.ask("Select an image (path): ")?;
        if answer.is_empty() {
            self.prompter.say("No file selected.")?;
            return Ok(None);
        }
        let path = PathBuf::from(answer);
        self.prompter.say(&format!("Selected image: {}", path.display()))?;
        load(&path).map(Some)
    }
}

/// Native "open file" dialog restricted to image types.
#[cfg(feature = "dialog")]
use caramel_core::decode::IMAGE_EXTENSIONS;

#[cfg(feature = "dialog")]
#[derive(Debug, Default)]
pub struct DialogSource;

#[cfg(feature = "dialog")]
impl ImageSource for DialogSource {
    fn select_and_decode(&mut self) -> Result<Option<PixelBuffer>, PipelineError> {
        let picked = rfd::FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file();
        match picked {
            Some(path) => load(&path).map(Some),
            None => Ok(None),
        }
    }
}
