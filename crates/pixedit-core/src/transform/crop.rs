//! Cropping driven by a rectangle drawn on the scaled preview.
//!
//! # Coordinate System
//!
//! - Selections arrive in preview space: integer pixels of the rendered preview
//! - `scale_ratio` is source pixels per preview pixel
//! - Source coordinates are `preview * scale_ratio`, truncated toward zero
//! - Origin is top-left; the region is half-open: `[top, bottom) x [left, right)`

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::PixelBuffer;

/// Why a crop selection was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropRejection {
    /// The drag covered fewer preview pixels than the minimum on some axis.
    #[error("selected area is too small ({dx}x{dy} px, at least {min} px per side required)")]
    DragTooSmall { dx: u32, dy: u32, min: u32 },

    /// The selection maps to no source pixels.
    #[error("selection maps to an empty region ({width}x{height})")]
    EmptyRegion { width: u32, height: u32 },
}

/// A pointer position on the preview canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewPoint {
    pub x: i32,
    pub y: i32,
}

impl PreviewPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A crop selection in preview space together with the ratio that maps it to
/// the source image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x1: i32,
    pub y1: i32,
    pub x2: i32,
    pub y2: i32,
    pub scale_ratio: f64,
}

/// A source-space rectangle, already ordered and clamped to the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceRect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl SourceRect {
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

impl CropRegion {
    pub fn new(start: PreviewPoint, end: PreviewPoint, scale_ratio: f64) -> Self {
        Self {
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            scale_ratio,
        }
    }

    /// Absolute drag distance in preview pixels along each axis.
    pub fn drag_extent(&self) -> (u32, u32) {
        (self.x2.abs_diff(self.x1), self.y2.abs_diff(self.y1))
    }

    /// Refuse drags shorter than `min_drag` preview pixels on either axis.
    pub fn check_drag(&self, min_drag: u32) -> Result<(), CropRejection> {
        let (dx, dy) = self.drag_extent();
        if dx < min_drag || dy < min_drag {
            return Err(CropRejection::DragTooSmall {
                dx,
                dy,
                min: min_drag,
            });
        }
        Ok(())
    }

    /// Map the selection into a `width` x `height` source image.
    ///
    /// Each coordinate is scaled and truncated, the corners are ordered so a
    /// drag may run in any direction, and the result is clamped to the image.
    pub fn source_rect(&self, width: u32, height: u32) -> SourceRect {
        let map = |v: i32, limit: u32| -> u32 {
            let scaled = (v as f64 * self.scale_ratio).trunc();
            scaled.clamp(0.0, limit as f64) as u32
        };

        let (ax, bx) = (map(self.x1, width), map(self.x2, width));
        let (ay, by) = (map(self.y1, height), map(self.y2, height));

        SourceRect {
            left: ax.min(bx),
            top: ay.min(by),
            right: ax.max(bx),
            bottom: ay.max(by),
        }
    }
}

/// Crop an image to the source region a preview selection maps to.
///
/// # Errors
///
/// Returns `CropRejection::EmptyRegion` when the mapped region has zero width
/// or height. The drag-size threshold is checked separately with
/// [`CropRegion::check_drag`].
pub fn apply_crop(image: &PixelBuffer, region: &CropRegion) -> Result<PixelBuffer, CropRejection> {
    let rect = region.source_rect(image.width, image.height);
    if rect.width() == 0 || rect.height() == 0 {
        return Err(CropRejection::EmptyRegion {
            width: rect.width(),
            height: rect.height(),
        });
    }
    Ok(crop_pixels(image, rect))
}

/// Copy a source rectangle out of an image. The rectangle must lie inside it.
pub(crate) fn crop_pixels(image: &PixelBuffer, rect: SourceRect) -> PixelBuffer {
    let out_width = rect.width() as usize;
    let out_height = rect.height() as usize;
    let src_stride = image.width as usize * 3;
    let row_bytes = out_width * 3;

    let mut output = Vec::with_capacity(out_width * out_height * 3);

    // Copy pixel data row by row
    for y in rect.top as usize..rect.bottom as usize {
        let start = y * src_stride + rect.left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    PixelBuffer::new(rect.width(), rect.height(), output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel stores its (x, y) position.
    fn test_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push((x % 256) as u8); // R
                pixels.push((y % 256) as u8); // G
                pixels.push(0); // B
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    fn region(x1: i32, y1: i32, x2: i32, y2: i32, scale_ratio: f64) -> CropRegion {
        CropRegion {
            x1,
            y1,
            x2,
            y2,
            scale_ratio,
        }
    }

    #[test]
    fn test_preview_drag_maps_through_ratio() {
        let img = test_image(250, 200);
        let sel = region(10, 10, 110, 60, 2.0);

        let rect = sel.source_rect(img.width, img.height);
        assert_eq!(
            rect,
            SourceRect {
                left: 20,
                top: 20,
                right: 220,
                bottom: 120
            }
        );

        let cropped = apply_crop(&img, &sel).unwrap();
        assert_eq!(cropped.width, 200);
        assert_eq!(cropped.height, 100);
        assert_eq!(cropped.pixel(0, 0), Some([20, 20, 0]));
        assert_eq!(cropped.pixel(199, 99), Some([219, 119, 0]));
    }

    #[test]
    fn test_fractional_ratio_truncates() {
        // 3 * 1.6 = 4.8 -> 4, 13 * 1.6 = 20.8 -> 20
        let rect = region(3, 3, 13, 13, 1.6).source_rect(100, 100);
        assert_eq!((rect.left, rect.right), (4, 20));
    }

    #[test]
    fn test_reverse_drag_is_normalized() {
        let img = test_image(50, 50);
        let forward = apply_crop(&img, &region(5, 5, 25, 15, 1.0)).unwrap();
        let backward = apply_crop(&img, &region(25, 15, 5, 5, 1.0)).unwrap();

        assert_eq!(forward, backward);
        assert_eq!((forward.width, forward.height), (20, 10));
    }

    #[test]
    fn test_selection_clamped_to_image() {
        let img = test_image(40, 30);
        let cropped = apply_crop(&img, &region(-10, -10, 500, 500, 1.0)).unwrap();

        assert_eq!(cropped, img);
    }

    #[test]
    fn test_selection_outside_image_is_empty() {
        let img = test_image(40, 30);
        let result = apply_crop(&img, &region(100, 100, 200, 200, 1.0));

        assert_eq!(
            result,
            Err(CropRejection::EmptyRegion {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn test_zero_width_after_mapping() {
        let img = test_image(40, 30);
        // Tiny ratio collapses both x coordinates onto column 0
        let result = apply_crop(&img, &region(0, 0, 10, 10, 0.05));
        assert!(matches!(result, Err(CropRejection::EmptyRegion { .. })));
    }

    #[test]
    fn test_check_drag_threshold() {
        assert!(region(0, 0, 5, 5, 1.0).check_drag(5).is_ok());
        assert_eq!(
            region(0, 0, 4, 50, 1.0).check_drag(5),
            Err(CropRejection::DragTooSmall {
                dx: 4,
                dy: 50,
                min: 5
            })
        );
        assert!(region(10, 10, 50, 6, 1.0).check_drag(5).is_err());
        // Direction does not matter
        assert!(region(50, 50, 10, 10, 1.0).check_drag(5).is_ok());
    }

    #[test]
    fn test_crop_does_not_touch_source() {
        let img = test_image(10, 10);
        let before = img.clone();
        let _ = apply_crop(&img, &region(2, 2, 8, 8, 1.0)).unwrap();
        assert_eq!(img, before);
    }
}
