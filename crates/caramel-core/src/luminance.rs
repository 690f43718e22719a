//! Luma weights using ITU-R BT.601 coefficients.
//!
//! These are the classic weights for converting gamma-encoded RGB to gray,
//! tuned to match perceived brightness.

/// ITU-R BT.601 coefficient for red channel.
pub const LUMA_R: f64 = 0.299;

/// ITU-R BT.601 coefficient for green channel.
pub const LUMA_G: f64 = 0.587;

/// ITU-R BT.601 coefficient for blue channel.
pub const LUMA_B: f64 = 0.114;

/// Calculate luma from u8 RGB values (0 to 255), rounded to nearest.
#[inline]
pub fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = LUMA_R * r as f64 + LUMA_G * g as f64 + LUMA_B * b as f64;
    y.round().clamp(0.0, 255.0) as u8
}
