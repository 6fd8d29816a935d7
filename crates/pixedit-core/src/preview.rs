//! Fit-to-canvas preview rendering.
//!
//! A preview is the source buffer scaled by `min(canvas / image, 1)` times the
//! user zoom. Rendering never touches the source; for the modified preview the
//! editor keeps the returned `scale_ratio` so crop selections can be mapped
//! back to source pixels.

use serde::{Deserialize, Serialize};

use crate::config::CanvasSize;
use crate::decode::{resize, DecodeError, FilterType, PixelBuffer};

/// User zoom as a whole percentage (100 = fitted size).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zoom {
    percent: u16,
}

impl Zoom {
    pub const fn from_percent(percent: u16) -> Self {
        Self { percent }
    }

    pub const fn percent(self) -> u16 {
        self.percent
    }

    pub fn factor(self) -> f64 {
        self.percent as f64 / 100.0
    }
}

/// A rendered preview and the ratio that maps its pixels back to the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Preview {
    pub image: PixelBuffer,
    /// Source pixels per preview pixel (`source width / preview width`).
    pub scale_ratio: f64,
}

/// The side-by-side pair shown by the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct Previews {
    pub original: Preview,
    pub modified: Preview,
}

/// Largest scale that fits the image in the canvas, never above 1.
pub fn fit_scale(canvas: CanvasSize, width: u32, height: u32) -> f64 {
    let sx = canvas.width as f64 / width as f64;
    let sy = canvas.height as f64 / height as f64;
    sx.min(sy).min(1.0)
}

/// Fit scale multiplied by the zoom factor.
pub fn preview_scale(canvas: CanvasSize, width: u32, height: u32, zoom: Zoom) -> f64 {
    fit_scale(canvas, width, height) * zoom.factor()
}

/// Preview size for an image: each side scaled and truncated, at least 1.
pub fn preview_dimensions(canvas: CanvasSize, width: u32, height: u32, zoom: Zoom) -> (u32, u32) {
    let scale = preview_scale(canvas, width, height, zoom);
    let w = ((width as f64 * scale) as u32).max(1);
    let h = ((height as f64 * scale) as u32).max(1);
    (w, h)
}

/// Render one preview of `image`.
pub fn render_preview(
    image: &PixelBuffer,
    canvas: CanvasSize,
    zoom: Zoom,
    filter: FilterType,
) -> Result<Preview, DecodeError> {
    let (width, height) = preview_dimensions(canvas, image.width, image.height, zoom);
    let preview = resize(image, width, height, filter)?;

    Ok(Preview {
        image: preview,
        scale_ratio: image.width as f64 / width as f64,
    })
}
