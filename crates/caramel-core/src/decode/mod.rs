//! Image decoding into [`PixelBuffer`](crate::PixelBuffer).
//!
//! Decoding goes through the `image` crate with format sniffing, so the
//! file extension is irrelevant. EXIF orientation is read with
//! `kamadak-exif` and applied before the pixels are handed out, so
//! transforms always see the image the way a viewer would show it.
//!
//! # Examples
//!
//! ```ignore
//! use caramel_core::decode::decode_file;
//!
//! let image = decode_file("photo.jpg")?;
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod reader;
mod types;

pub use reader::{decode_file, decode_image, get_orientation, IMAGE_EXTENSIONS};
pub use types::{DecodeError, Orientation};
