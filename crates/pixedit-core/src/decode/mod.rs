//! Image decoding and resampling for pixedit.
//!
//! This module provides:
//! - The `PixelBuffer` type every other module operates on
//! - Decoding PNG and JPEG images (with EXIF orientation applied)
//! - Resizing, including the area-averaging filter used for previews
//!
//! All operations are synchronous; a failed decode never produces a
//! partially filled buffer.

mod reader;
mod resize;
mod types;

pub use reader::{decode_image, load_image_file};
pub use resize::resize;
pub use types::{DecodeError, FilterType, Orientation, PixelBuffer};
