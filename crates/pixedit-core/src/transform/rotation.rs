//! Lossless quarter-turn rotation.
//!
//! Rotation only permutes pixels; there is no interpolation, so four
//! clockwise turns reproduce the input exactly.

use crate::decode::PixelBuffer;

/// Rotate an image 90 degrees clockwise.
///
/// The output is `height` pixels wide and `width` pixels tall. Source pixel
/// `(x, y)` lands at `(height - 1 - y, x)`.
pub fn rotate_clockwise(image: &PixelBuffer) -> PixelBuffer {
    let (src_w, src_h) = (image.width as usize, image.height as usize);
    let (dst_w, dst_h) = (src_h, src_w);
    let mut output = vec![0u8; image.pixels.len()];

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let src_x = dst_y;
            let src_y = src_h - 1 - dst_x;

            let src_idx = (src_y * src_w + src_x) * 3;
            let dst_idx = (dst_y * dst_w + dst_x) * 3;
            output[dst_idx..dst_idx + 3].copy_from_slice(&image.pixels[src_idx..src_idx + 3]);
        }
    }

    PixelBuffer::new(image.height, image.width, output)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 3x2 image where each pixel stores its own coordinates.
    fn coordinate_image(width: u32, height: u32) -> PixelBuffer {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[x as u8, y as u8, 0]);
            }
        }
        PixelBuffer::new(width, height, pixels)
    }

    #[test]
    fn test_rotation_swaps_dimensions() {
        let img = coordinate_image(100, 50);
        let rotated = rotate_clockwise(&img);

        assert_eq!(rotated.width, 50);
        assert_eq!(rotated.height, 100);
        assert_eq!(rotated.pixels.len(), img.pixels.len());
    }

    #[test]
    fn test_rotation_is_clockwise() {
        // a b c        d a
        // d e f   ->   e b
        //              f c
        let img = coordinate_image(3, 2);
        let rotated = rotate_clockwise(&img);

        // Top-left of the result is the bottom-left of the source
        assert_eq!(rotated.pixel(0, 0), Some([0, 1, 0]));
        // Top-right of the result is the top-left of the source
        assert_eq!(rotated.pixel(1, 0), Some([0, 0, 0]));
        // Bottom-right of the result is the top-right of the source
        assert_eq!(rotated.pixel(1, 2), Some([2, 0, 0]));
    }

    #[test]
    fn test_rotation_single_pixel() {
        let img = PixelBuffer::new(1, 1, vec![9, 8, 7]);
        assert_eq!(rotate_clockwise(&img), img);
    }

    #[test]
    fn test_rotation_empty_image() {
        let img = PixelBuffer::new(0, 5, vec![]);
        let rotated = rotate_clockwise(&img);
        assert_eq!((rotated.width, rotated.height), (5, 0));
    }
}
