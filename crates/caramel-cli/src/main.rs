//! caramel - apply one elementary transform to an image
//!
//! Picks an image, runs a single transform from `caramel-core` on it,
//! previews the result and optionally saves it as PNG.

use anyhow::{bail, Context, Result};
use caramel_core::{run_pipeline, ImageSink, ImageSource, PipelineOutcome};
use clap::Parser;
use tracing::info;

mod cli;
mod logging;
mod prompt;
mod sink;
mod source;

use cli::Cli;
use prompt::StdioPrompter;
use sink::{FileSink, FolderPicker, PromptSink};
use source::{PathSource, PromptSource};

#[cfg(feature = "dialog")]
fn dialog_source() -> Option<Box<dyn ImageSource>> {
    Some(Box::new(source::DialogSource))
}

#[cfg(not(feature = "dialog"))]
fn dialog_source() -> Option<Box<dyn ImageSource>> {
    None
}

#[cfg(feature = "dialog")]
fn dialog_folder_picker() -> Option<FolderPicker> {
    Some(FolderPicker::Dialog)
}

#[cfg(not(feature = "dialog"))]
fn dialog_folder_picker() -> Option<FolderPicker> {
    None
}

fn build_source(cli: &Cli) -> Box<dyn ImageSource> {
    if let Some(path) = &cli.input {
        return Box::new(PathSource::new(path));
    }
    if cli.dialog {
        if let Some(source) = dialog_source() {
            return source;
        }
    }
    Box::new(PromptSource::new(StdioPrompter))
}

fn build_sink(cli: &Cli) -> Box<dyn ImageSink> {
    if let Some(path) = &cli.output {
        return Box::new(FileSink::new(path));
    }
    let picker = match dialog_folder_picker() {
        Some(picker) if cli.dialog => picker,
        _ => FolderPicker::Prompt,
    };
    Box::new(PromptSink::new(StdioPrompter).assume_yes(cli.yes).folder_picker(picker))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if cli.dialog && dialog_source().is_none() {
        bail!("native dialogs are unavailable: rebuild caramel with `--features dialog`");
    }

    let operation = cli.operation().context("Invalid operation arguments")?;

    let mut source = build_source(&cli);
    let mut sink = build_sink(&cli);

    let outcome = run_pipeline(source.as_mut(), &operation, sink.as_mut())
        .with_context(|| format!("Failed to {}", operation.name()))?;

    match outcome {
        PipelineOutcome::Cancelled => info!("cancelled: no image selected"),
        PipelineOutcome::Declined => info!("result not saved"),
        PipelineOutcome::Saved(path) => {
            if cli.output.is_some() {
                println!("Image saved to: {}", path.display());
            }
        }
    }

    Ok(())
}
