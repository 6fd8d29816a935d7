//! PNG encoding for export.

use image::codecs::png::PngEncoder;
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;

use super::types::{validate_rgb, EncodeError};
use crate::decode::PixelBuffer;

/// Encode a buffer as an 8-bit RGB PNG with the encoder's default settings.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, EncodeError> {
    validate_rgb(&image.pixels, image.width, image.height)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &image.pixels,
            image.width,
            image.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
