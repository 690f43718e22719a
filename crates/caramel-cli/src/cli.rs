//! Command-line arguments.
//!
//! Exactly one operation flag must be given; the flags form a required,
//! mutually exclusive group.

use std::path::PathBuf;

use caramel_core::{FlipAxis, Operation, QuarterTurn, TransformError};
use clap::{ArgAction, ArgGroup, Parser};

#[derive(Debug, Parser)]
#[command(name = "caramel")]
#[command(author, version, about = "Apply one elementary transform to an image")]
#[command(long_about = "
Apply one elementary transform to an image, preview the result and
optionally save it as PNG.

Examples:
  caramel --invert                          # pick a file, preview, prompt to save
  caramel --brightness -40 --input a.jpg    # darken a.jpg
  caramel --blur 2 1.5 --input a.png -o blurred.png
  caramel --rotate 90 --input a.png -o rotated.png
")]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["invert", "brightness", "grayscale", "blur", "sharpen", "flip", "rotate"])
))]
pub struct Cli {
    /// Invert an image
    #[arg(short, long)]
    pub invert: bool,

    /// Increase (+) or decrease (-) brightness
    #[arg(long, value_name = "VAL", allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Convert an image to grayscale
    #[arg(long)]
    pub grayscale: bool,

    /// Gaussian blur; radius controls area, sigma controls strength
    #[arg(long, num_args = 2, value_names = ["RADIUS", "SIGMA"], allow_negative_numbers = true)]
    pub blur: Option<Vec<f64>>,

    /// Sharpen an image
    #[arg(long, value_name = "INTENSITY", allow_negative_numbers = true)]
    pub sharpen: Option<f64>,

    /// horizontal: left to right, vertical: upside down
    #[arg(long, value_name = "AXIS")]
    pub flip: Option<FlipAxis>,

    /// Rotate anti-clockwise by 90, 180 or 270 degrees
    #[arg(long, value_name = "DEG")]
    pub rotate: Option<QuarterTurn>,

    /// Image to open instead of asking for one
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Write the result here as PNG without previewing or prompting
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Answer yes to the save confirmation
    #[arg(short, long)]
    pub yes: bool,

    /// Use native file dialogs instead of terminal prompts (needs the `dialog` feature)
    #[arg(long)]
    pub dialog: bool,

    /// Verbose output (repeat for more detail)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// The operation selected by the flags.
    pub fn operation(&self) -> Result<Operation, TransformError> {
        if self.invert {
            return Ok(Operation::Invert);
        }
        if let Some(value) = self.brightness {
            return Ok(Operation::Brightness(value));
        }
        if self.grayscale {
            return Ok(Operation::Grayscale);
        }
        if let Some(args) = &self.blur {
            return match args.as_slice() {
                [radius, sigma] => Operation::blur_from_reals(*radius, *sigma),
                _ => Err(TransformError::InvalidArgument(
                    "blur expects RADIUS and SIGMA".to_string(),
                )),
            };
        }
        if let Some(intensity) = self.sharpen {
            return Ok(Operation::Sharpen(intensity));
        }
        if let Some(axis) = self.flip {
            return Ok(Operation::Flip(axis));
        }
        if let Some(turn) = self.rotate {
            return Ok(Operation::Rotate(turn));
        }
        Err(TransformError::InvalidArgument("no operation selected".to_string()))
    }
}
