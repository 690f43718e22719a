//! Operation dispatch: one typed value per selectable transform.
//!
//! Front ends build an [`Operation`] from their own argument syntax and
//! hand it to [`Operation::apply`]; the transforms never see raw strings.

use std::fmt;

use crate::buffer::PixelBuffer;
use crate::kernel::MAX_RADIUS;
use crate::transform::{self, FlipAxis, QuarterTurn, TransformError};

/// A single selected transform with its parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operation {
    Invert,
    Brightness(i32),
    Grayscale,
    Blur { radius: u32, sigma: f64 },
    Sharpen(f64),
    Flip(FlipAxis),
    Rotate(QuarterTurn),
}

impl Operation {
    /// Build a blur from real-valued arguments as typed on a command line.
    ///
    /// The radius must be a whole number in `0..=MAX_RADIUS` and sigma a
    /// positive finite number.
    pub fn blur_from_reals(radius: f64, sigma: f64) -> Result<Self, TransformError> {
        if !radius.is_finite() || radius < 0.0 || radius.fract() != 0.0 {
            return Err(TransformError::InvalidArgument(format!(
                "blur radius must be a non-negative whole number, got {radius}"
            )));
        }
        if radius > f64::from(MAX_RADIUS) {
            return Err(TransformError::InvalidArgument(format!(
                "blur radius must be at most {MAX_RADIUS}, got {radius}"
            )));
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(TransformError::InvalidArgument(format!(
                "sigma must be a positive finite number, got {sigma}"
            )));
        }
        Ok(Operation::Blur {
            radius: radius as u32,
            sigma,
        })
    }

    /// Stable lowercase name of the operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Invert => "invert",
            Operation::Brightness(_) => "brightness",
            Operation::Grayscale => "grayscale",
            Operation::Blur { .. } => "blur",
            Operation::Sharpen(_) => "sharpen",
            Operation::Flip(_) => "flip",
            Operation::Rotate(_) => "rotate",
        }
    }

    /// Run the transform on `buffer`, returning a new buffer.
    pub fn apply(&self, buffer: &PixelBuffer) -> Result<PixelBuffer, TransformError> {
        match *self {
            Operation::Invert => Ok(transform::invert(buffer)),
            Operation::Brightness(value) => Ok(transform::brightness(buffer, value)),
            Operation::Grayscale => transform::grayscale(buffer),
            Operation::Blur { radius, sigma } => transform::blur(buffer, radius, sigma),
            Operation::Sharpen(intensity) => transform::sharpen(buffer, intensity),
            Operation::Flip(axis) => Ok(transform::flip(buffer, axis)),
            Operation::Rotate(turn) => Ok(transform::rotate(buffer, turn)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Invert | Operation::Grayscale => f.write_str(self.name()),
            Operation::Brightness(v) => write!(f, "brightness({v:+})"),
            Operation::Blur { radius, sigma } => write!(f, "blur(radius={radius}, sigma={sigma})"),
            Operation::Sharpen(k) => write!(f, "sharpen({k})"),
            Operation::Flip(axis) => write!(f, "flip({axis})"),
            Operation::Rotate(turn) => write!(f, "rotate({turn})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_matches_direct_calls() {
        let img = PixelBuffer::new(2, 2, 3, (0..12).map(|v| v * 20).collect()).unwrap();

        assert_eq!(Operation::Invert.apply(&img).unwrap(), transform::invert(&img));
        assert_eq!(
            Operation::Brightness(-30).apply(&img).unwrap(),
            transform::brightness(&img, -30)
        );
        assert_eq!(
            Operation::Grayscale.apply(&img).unwrap(),
            transform::grayscale(&img).unwrap()
        );
        assert_eq!(
            Operation::Flip(FlipAxis::Vertical).apply(&img).unwrap(),
            transform::flip(&img, FlipAxis::Vertical)
        );
        assert_eq!(
            Operation::Rotate(QuarterTurn::Deg270).apply(&img).unwrap(),
            transform::rotate(&img, QuarterTurn::Deg270)
        );
    }

    #[test]
    fn test_grayscale_on_gray_fails_through_dispatch() {
        let img = PixelBuffer::from_rows(&[[1u8, 2]]).unwrap();
        assert!(matches!(
            Operation::Grayscale.apply(&img),
            Err(TransformError::InvalidShape { actual: 1, .. })
        ));
    }

    #[test]
    fn test_blur_from_reals() {
        assert_eq!(
            Operation::blur_from_reals(2.0, 1.5).unwrap(),
            Operation::Blur { radius: 2, sigma: 1.5 }
        );
        assert!(Operation::blur_from_reals(1.5, 1.0).is_err());
        assert!(Operation::blur_from_reals(-1.0, 1.0).is_err());
        assert!(Operation::blur_from_reals(1.0, 0.0).is_err());
        assert!(Operation::blur_from_reals(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_blur_from_reals_caps_radius() {
        assert!(Operation::blur_from_reals(f64::from(MAX_RADIUS), 1.0).is_ok());
        let err = Operation::blur_from_reals(3e9, 1.0).unwrap_err();
        assert!(matches!(err, TransformError::InvalidArgument(_)));

        // A radius built directly still fails cleanly instead of allocating.
        let img = PixelBuffer::filled(2, 2, &[10]).unwrap();
        let op = Operation::Blur { radius: 3_000_000_000, sigma: 1.0 };
        assert!(op.apply(&img).is_err());
    }

    #[test]
    fn test_end_to_end_flat_blur() {
        let img = PixelBuffer::filled(4, 4, &[100, 150, 200]).unwrap();
        let op = Operation::blur_from_reals(1.0, 1.0).unwrap();
        assert_eq!(op.apply(&img).unwrap(), img);
    }

    #[test]
    fn test_end_to_end_invert_gray() {
        let img = PixelBuffer::from_rows(&[[0u8, 128], [255, 64]]).unwrap();
        let out = Operation::Invert.apply(&img).unwrap();
        assert_eq!(out, PixelBuffer::from_rows(&[[255u8, 127], [0, 191]]).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(Operation::Brightness(15).to_string(), "brightness(+15)");
        assert_eq!(Operation::Flip(FlipAxis::Horizontal).to_string(), "flip(horizontal)");
        assert_eq!(Operation::Rotate(QuarterTurn::Deg180).to_string(), "rotate(180)");
        assert_eq!(Operation::Invert.to_string(), "invert");
        assert_eq!(Operation::Sharpen(1.5).name(), "sharpen");
    }
}
