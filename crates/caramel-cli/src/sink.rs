//! Image sinks: straight-to-file output, or a terminal preview followed by
//! a confirm-and-save dialogue.

use std::path::PathBuf;

use caramel_core::encode::write_png;
use caramel_core::{ImageSink, PipelineError, PixelBuffer, SaveOutcome};

use crate::prompt::Prompter;

/// Writes every result to a fixed path without asking.
#[derive(Debug)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ImageSink for FileSink {
    fn preview_and_maybe_save(&mut self, buffer: &PixelBuffer) -> Result<SaveOutcome, PipelineError> {
        write_png(buffer, &self.path)?;
        Ok(SaveOutcome::Saved(self.path.clone()))
    }
}

/// How the destination folder is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FolderPicker {
    Prompt,
    #[cfg(feature = "dialog")]
    Dialog,
}

/// One-line text summary standing in for a visual preview.
pub fn describe(buffer: &PixelBuffer) -> String {
    let labels: &[&str] = match buffer.channels() {
        1 => &["gray"],
        3 => &["R", "G", "B"],
        _ => &["R", "G", "B", "A"],
    };
    let means: Vec<String> = labels
        .iter()
        .zip(buffer.channel_means())
        .map(|(label, mean)| format!("{label} {mean:.1}"))
        .collect();
    format!(
        "Image preview: {}x{}, {} channel(s), mean [{}]",
        buffer.width(),
        buffer.height(),
        buffer.channels(),
        means.join(", ")
    )
}

/// Shows a preview summary, then asks whether and where to save.
///
/// Declining, or leaving the folder or file name empty, aborts the save
/// without error.
#[derive(Debug)]
pub struct PromptSink<P> {
    prompter: P,
    assume_yes: bool,
    folder: FolderPicker,
}

impl<P: Prompter> PromptSink<P> {
    pub fn new(prompter: P) -> Self {
        Self {
            prompter,
            assume_yes: false,
            folder: FolderPicker::Prompt,
        }
    }

    /// Skip the yes/no confirmation.
    pub fn assume_yes(mut self, yes: bool) -> Self {
        self.assume_yes = yes;
        self
    }

    pub fn folder_picker(mut self, folder: FolderPicker) -> Self {
        self.folder = folder;
        self
    }

    fn choose_folder(&mut self) -> Result<Option<PathBuf>, PipelineError> {
        match self.folder {
            FolderPicker::Prompt => {
                let answer = self.prompter.ask("Choose a destination to save the image (folder): ")?;
                Ok((!answer.is_empty()).then(|| PathBuf::from(answer)))
            }
            #[cfg(feature = "dialog")]
            FolderPicker::Dialog => Ok(rfd::FileDialog::new()
                .set_title("Choose a destination to save the image")
                .pick_folder()),
        }
    }
}

impl<P: Prompter> ImageSink for PromptSink<P> {
    fn preview_and_maybe_save(&mut self, buffer: &PixelBuffer) -> Result<SaveOutcome, PipelineError> {
        self.prompter.say(&describe(buffer))?;

        if !self.assume_yes {
            let answer = self.prompter.ask("Do you want to save this image? (y/n): ")?;
            if !answer.eq_ignore_ascii_case("y") {
                self.prompter.say("Image save canceled.")?;
                return Ok(SaveOutcome::Declined);
            }
        }

        let Some(folder) = self.choose_folder()? else {
            self.prompter.say("Save canceled.")?;
            return Ok(SaveOutcome::Declined);
        };

        let name = self.prompter.ask("Enter a name for your file (without extensions): ")?;
        if name.is_empty() {
            self.prompter.say("Save canceled.")?;
            return Ok(SaveOutcome::Declined);
        }

        let path = folder.join(format!("{name}.png"));
        write_png(buffer, &path)?;
        self.prompter.say(&format!("Image saved to: {}", path.display()))?;
        Ok(SaveOutcome::Saved(path))
    }
}
