//! WASM bindings for the stateless editing operations.
//!
//! These run on a `JsPixelBuffer` without any history; use `JsEditor` for the
//! undoable session.

use crate::error::to_js_error;
use crate::types::JsPixelBuffer;
use pixedit_core::config::CanvasSize;
use pixedit_core::preview::{self, Zoom};
use pixedit_core::transform::{
    apply_crop, apply_grayscale, rotate_clockwise as core_rotate, CropRegion, PreviewPoint,
};
use wasm_bindgen::prelude::*;

fn to_core(image: &JsPixelBuffer) -> Result<pixedit_core::decode::PixelBuffer, JsValue> {
    image
        .to_buffer()
        .ok_or_else(|| to_js_error("pixel data does not match image dimensions"))
}

/// Convert to single-channel luminance, replicated into R, G and B.
#[wasm_bindgen]
pub fn grayscale(image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
    let src = to_core(image)?;
    Ok(JsPixelBuffer::from_buffer(apply_grayscale(&src)))
}

/// Rotate 90 degrees clockwise. Width and height swap.
#[wasm_bindgen]
pub fn rotate_clockwise(image: &JsPixelBuffer) -> Result<JsPixelBuffer, JsValue> {
    let src = to_core(image)?;
    Ok(JsPixelBuffer::from_buffer(core_rotate(&src)))
}

/// Crop `image` to a rectangle drawn on a preview of it.
///
/// Corners are preview pixels and may be given in any order; `scale_ratio` is
/// source pixels per preview pixel.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Preview shown at half size
/// const cropped = crop_preview_region(image, 10, 10, 110, 60, 2.0);
/// // cropped is 200x100
/// ```
#[wasm_bindgen]
pub fn crop_preview_region(
    image: &JsPixelBuffer,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    scale_ratio: f64,
) -> Result<JsPixelBuffer, JsValue> {
    let src = to_core(image)?;
    let region = CropRegion::new(PreviewPoint::new(x1, y1), PreviewPoint::new(x2, y2), scale_ratio);
    apply_crop(&src, &region)
        .map(JsPixelBuffer::from_buffer)
        .map_err(to_js_error)
}

/// Size a `width` x `height` image is shown at on the given canvas and zoom.
///
/// Returns `[preview_width, preview_height]`.
#[wasm_bindgen]
pub fn preview_dimensions(
    width: u32,
    height: u32,
    canvas_width: u32,
    canvas_height: u32,
    zoom_percent: u16,
) -> Vec<u32> {
    let canvas = CanvasSize {
        width: canvas_width.max(1),
        height: canvas_height.max(1),
    };
    let (w, h) = preview::preview_dimensions(
        canvas,
        width.max(1),
        height.max(1),
        Zoom::from_percent(zoom_percent),
    );
    vec![w, h]
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_crop_outside_image_fails() {
        let img = JsPixelBuffer::new(10, 10, vec![0u8; 300]);
        assert!(crop_preview_region(&img, 50, 50, 90, 90, 1.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_grayscale_rejects_bad_buffer() {
        let img = JsPixelBuffer::new(10, 10, vec![0u8; 5]);
        assert!(grayscale(&img).is_err());
    }
}
