//! Lossless orientation changes: mirror flips and quarter-turn rotations.
//!
//! Both operate on whole pixels, so every channel (alpha included) moves
//! together and no resampling takes place.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::TransformError;
use crate::buffer::PixelBuffer;

/// Mirror axis for [`flip`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlipAxis {
    /// Mirror columns (left-right).
    Horizontal,
    /// Mirror rows (top-bottom).
    Vertical,
}

impl FlipAxis {
    pub fn as_str(self) -> &'static str {
        match self {
            FlipAxis::Horizontal => "horizontal",
            FlipAxis::Vertical => "vertical",
        }
    }
}

impl fmt::Display for FlipAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlipAxis {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Ok(FlipAxis::Horizontal),
            "vertical" => Ok(FlipAxis::Vertical),
            other => Err(TransformError::InvalidArgument(format!(
                "unknown flip axis '{other}': expected 'horizontal' or 'vertical'"
            ))),
        }
    }
}

/// Counter-clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuarterTurn {
    Deg90,
    Deg180,
    Deg270,
}

impl QuarterTurn {
    /// Accepts exactly 90, 180 or 270.
    pub fn from_degrees(degrees: i64) -> Result<Self, TransformError> {
        match degrees {
            90 => Ok(QuarterTurn::Deg90),
            180 => Ok(QuarterTurn::Deg180),
            270 => Ok(QuarterTurn::Deg270),
            other => Err(TransformError::InvalidArgument(format!(
                "unsupported rotation {other}: expected 90, 180 or 270 degrees"
            ))),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            QuarterTurn::Deg90 => 90,
            QuarterTurn::Deg180 => 180,
            QuarterTurn::Deg270 => 270,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuarterTurn::Deg90 | QuarterTurn::Deg270)
    }
}

impl fmt::Display for QuarterTurn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

impl FromStr for QuarterTurn {
    type Err = TransformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let degrees: i64 = s.trim().parse().map_err(|_| {
            TransformError::InvalidArgument(format!("rotation '{s}' is not an integer number of degrees"))
        })?;
        Self::from_degrees(degrees)
    }
}

/// Mirror the image across the given axis.
pub fn flip(buffer: &PixelBuffer, axis: FlipAxis) -> PixelBuffer {
    debug!(%axis, width = buffer.width(), height = buffer.height(), "flip");
    let c = buffer.channels() as usize;
    let row_len = buffer.width() as usize * c;
    let mut out = Vec::with_capacity(buffer.byte_size());

    match axis {
        FlipAxis::Horizontal => {
            for row in buffer.samples().chunks_exact(row_len) {
                for px in row.chunks_exact(c).rev() {
                    out.extend_from_slice(px);
                }
            }
        }
        FlipAxis::Vertical => {
            for row in buffer.samples().chunks_exact(row_len).rev() {
                out.extend_from_slice(row);
            }
        }
    }

    PixelBuffer::from_parts(buffer.width(), buffer.height(), buffer.channels(), out)
}

/// Rotate the image counter-clockwise by a quarter-turn multiple.
///
/// 90 and 270 degree turns swap width and height.
///
/// # Example
///
/// ```
/// use caramel_core::transform::{rotate, QuarterTurn};
/// use caramel_core::PixelBuffer;
///
/// let img = PixelBuffer::from_rows(&[[1u8, 2, 3], [4, 5, 6]]).unwrap();
/// let out = rotate(&img, QuarterTurn::Deg90);
/// assert_eq!((out.width(), out.height()), (2, 3));
/// assert_eq!(out.samples(), &[3, 6, 2, 5, 1, 4]);
/// ```
pub fn rotate(buffer: &PixelBuffer, turn: QuarterTurn) -> PixelBuffer {
    debug!(degrees = turn.degrees(), width = buffer.width(), height = buffer.height(), "rotate");
    let (w, h) = (buffer.width() as usize, buffer.height() as usize);
    let c = buffer.channels() as usize;
    let src = buffer.samples();
    let mut out = Vec::with_capacity(src.len());

    let mut push = |row: usize, col: usize| {
        let idx = (row * w + col) * c;
        out.extend_from_slice(&src[idx..idx + c]);
    };

    match turn {
        // out(r, c) = in(c, w - 1 - r), output is h wide and w tall
        QuarterTurn::Deg90 => {
            for r in 0..w {
                for col in 0..h {
                    push(col, w - 1 - r);
                }
            }
        }
        QuarterTurn::Deg180 => {
            for r in (0..h).rev() {
                for col in (0..w).rev() {
                    push(r, col);
                }
            }
        }
        // out(r, c) = in(h - 1 - c, r)
        QuarterTurn::Deg270 => {
            for r in 0..w {
                for col in 0..h {
                    push(h - 1 - col, r);
                }
            }
        }
    }

    let (out_w, out_h) = if turn.swaps_dimensions() {
        (buffer.height(), buffer.width())
    } else {
        (buffer.width(), buffer.height())
    };
    PixelBuffer::from_parts(out_w, out_h, buffer.channels(), out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PixelBuffer {
        // 1 2 3
        // 4 5 6
        PixelBuffer::from_rows(&[[1u8, 2, 3], [4, 5, 6]]).unwrap()
    }

    #[test]
    fn test_flip_horizontal() {
        let out = flip(&sample(), FlipAxis::Horizontal);
        assert_eq!(out.samples(), &[3, 2, 1, 6, 5, 4]);
    }

    #[test]
    fn test_flip_vertical() {
        let out = flip(&sample(), FlipAxis::Vertical);
        assert_eq!(out.samples(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_flip_keeps_pixels_intact() {
        let img = PixelBuffer::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let out = flip(&img, FlipAxis::Horizontal);
        assert_eq!(out.samples(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_rotate_90_counter_clockwise() {
        // 3 6
        // 2 5
        // 1 4
        let out = rotate(&sample(), QuarterTurn::Deg90);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(out.samples(), &[3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotate_180() {
        let out = rotate(&sample(), QuarterTurn::Deg180);
        assert_eq!((out.width(), out.height()), (3, 2));
        assert_eq!(out.samples(), &[6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_rotate_270() {
        // 4 1
        // 5 2
        // 6 3
        let out = rotate(&sample(), QuarterTurn::Deg270);
        assert_eq!((out.width(), out.height()), (2, 3));
        assert_eq!(out.samples(), &[4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_multichannel() {
        let img = PixelBuffer::new(2, 1, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        let out = rotate(&img, QuarterTurn::Deg90);
        assert_eq!((out.width(), out.height()), (1, 2));
        assert_eq!(out.samples(), &[4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_flip_axis_from_str() {
        assert_eq!("horizontal".parse::<FlipAxis>().unwrap(), FlipAxis::Horizontal);
        assert_eq!("Vertical".parse::<FlipAxis>().unwrap(), FlipAxis::Vertical);
        assert!(matches!(
            "diagonal".parse::<FlipAxis>(),
            Err(TransformError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_quarter_turn_parsing() {
        assert_eq!(QuarterTurn::from_degrees(90).unwrap(), QuarterTurn::Deg90);
        assert_eq!("270".parse::<QuarterTurn>().unwrap(), QuarterTurn::Deg270);
        assert!(QuarterTurn::from_degrees(45).is_err());
        assert!(QuarterTurn::from_degrees(0).is_err());
        assert!(QuarterTurn::from_degrees(360).is_err());
        assert!("ninety".parse::<QuarterTurn>().is_err());
    }

    #[test]
    fn test_quarter_turn_swaps_dimensions() {
        assert!(QuarterTurn::Deg90.swaps_dimensions());
        assert!(!QuarterTurn::Deg180.swaps_dimensions());
        assert!(QuarterTurn::Deg270.swaps_dimensions());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
