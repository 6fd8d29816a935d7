//! Image resizing for preview rendering.
//!
//! `Area` resampling is implemented here as an exact box integral over the
//! source pixels; the other filters delegate to the `image` crate.
//! All functions return new `PixelBuffer` instances without modifying the input.

use super::{DecodeError, FilterType, PixelBuffer};

/// Resize an image to exact dimensions.
///
/// `FilterType::Area` averages every source pixel covered by a destination
/// pixel, weighted by coverage. It only applies when neither axis grows;
/// upscales fall back to bilinear interpolation.
///
/// # Errors
///
/// Returns `DecodeError::InvalidDimensions` if either target dimension is zero,
/// or `DecodeError::CorruptedFile` if the source buffer is inconsistent.
pub fn resize(
    image: &PixelBuffer,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<PixelBuffer, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidDimensions { width, height });
    }

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    if image.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }

    if filter == FilterType::Area && width <= image.width && height <= image.height {
        return Ok(resize_area(image, width, height));
    }

    let rgb_image = image
        .to_rgb_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Failed to create RgbImage".to_string()))?;

    let resized = image::imageops::resize(&rgb_image, width, height, filter.to_image_filter());

    Ok(PixelBuffer::from_rgb_image(resized))
}

/// Per-destination list of (source index, weight) pairs along one axis.
fn area_weights(src_len: u32, dst_len: u32) -> Vec<Vec<(usize, f64)>> {
    let scale = src_len as f64 / dst_len as f64;

    (0..dst_len)
        .map(|d| {
            let start = d as f64 * scale;
            let end = (d as f64 + 1.0) * scale;
            let first = start.floor() as u32;
            let last = (end.ceil() as u32).min(src_len);

            (first..last)
                .filter_map(|s| {
                    let covered = end.min(s as f64 + 1.0) - start.max(s as f64);
                    (covered > 1e-9).then(|| (s as usize, covered / scale))
                })
                .collect()
        })
        .collect()
}

fn resize_area(image: &PixelBuffer, width: u32, height: u32) -> PixelBuffer {
    let x_weights = area_weights(image.width, width);
    let y_weights = area_weights(image.height, height);
    let src_stride = image.width as usize * 3;

    let mut output = Vec::with_capacity(width as usize * height as usize * 3);

    for row in &y_weights {
        for col in &x_weights {
            let mut acc = [0.0f64; 3];
            for &(sy, wy) in row {
                let row_start = sy * src_stride;
                for &(sx, wx) in col {
                    let idx = row_start + sx * 3;
                    let w = wy * wx;
                    acc[0] += image.pixels[idx] as f64 * w;
                    acc[1] += image.pixels[idx + 1] as f64 * w;
                    acc[2] += image.pixels[idx + 2] as f64 * w;
                }
            }
            for channel in acc {
                output.push(channel.round().clamp(0.0, 255.0) as u8);
            }
        }
    }

    PixelBuffer::new(width, height, output)
}
