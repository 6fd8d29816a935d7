//! Image encoding WASM bindings.
//!
//! # Functions
//!
//! - [`encode_jpeg`] - Encode raw RGB pixel data to JPEG bytes
//! - [`encode_png`] - Encode a JsPixelBuffer to PNG bytes
//! - [`encode_image`] - Encode a JsPixelBuffer, picking the format from a file name
//!
//! # Example
//!
//! ```typescript
//! import { encode_image } from '@pixedit/wasm';
//!
//! const bytes = encode_image(image, 'holiday.jpg', 95);
//! const blob = new Blob([bytes], { type: 'image/jpeg' });
//! ```

use std::path::Path;

use crate::error::to_js_error;
use crate::types::JsPixelBuffer;
use pixedit_core::encode::{self, OutputFormat};
use wasm_bindgen::prelude::*;

/// Encode RGB pixel data to JPEG bytes.
///
/// # Arguments
///
/// * `pixels` - RGB pixel data (3 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `quality` - JPEG quality (1-100, editor default: 95)
///
/// # Errors
///
/// Throws if the pixel data length doesn't match width * height * 3, or
/// either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode an image to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsPixelBuffer) -> Result<Vec<u8>, JsValue> {
    let buffer = image
        .to_buffer()
        .ok_or_else(|| to_js_error("pixel data does not match image dimensions"))?;
    encode::encode_png(&buffer).map_err(to_js_error)
}

/// Encode an image in the format implied by `file_name`'s extension
/// (`.png`, `.jpg`, `.jpeg`; no extension means PNG).
#[wasm_bindgen]
pub fn encode_image(image: &JsPixelBuffer, file_name: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
    let format = OutputFormat::from_path(Path::new(file_name)).map_err(to_js_error)?;
    let buffer = image
        .to_buffer()
        .ok_or_else(|| to_js_error("pixel data does not match image dimensions"))?;
    encode::encode_image(&buffer, format, quality).map_err(to_js_error)
}

/// MIME type for the format implied by `file_name`, if supported.
#[wasm_bindgen]
pub fn mime_type_for(file_name: &str) -> Option<String> {
    OutputFormat::from_path(Path::new(file_name))
        .ok()
        .map(|format| format.mime_type().to_string())
}
