//! Grayscale conversion that keeps the three-channel layout.

use crate::decode::PixelBuffer;
use crate::luminance::calculate_luma_u8;

/// Convert an image to gray: every pixel's BT.601 luma is written to all
/// three channels.
///
/// The output has the same dimensions and channel count as the input, so it
/// can flow through the rest of the pipeline unchanged. Applying it twice
/// gives the same result as applying it once.
pub fn apply_grayscale(image: &PixelBuffer) -> PixelBuffer {
    let pixels = image
        .pixels
        .chunks_exact(3)
        .flat_map(|p| {
            let luma = calculate_luma_u8(p[0], p[1], p[2]);
            [luma, luma, luma]
        })
        .collect();

    PixelBuffer::new(image.width, image.height, pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grayscale_equalizes_channels() {
        let img = PixelBuffer::new(2, 1, vec![255, 0, 0, 10, 200, 30]);
        let gray = apply_grayscale(&img);

        assert_eq!((gray.width, gray.height), (2, 1));
        for p in gray.pixels.chunks(3) {
            assert_eq!(p[0], p[1]);
            assert_eq!(p[1], p[2]);
        }
        assert_eq!(gray.pixel(0, 0), Some([76, 76, 76]));
    }

    #[test]
    fn test_grayscale_leaves_input_untouched() {
        let img = PixelBuffer::new(1, 1, vec![1, 2, 3]);
        let _ = apply_grayscale(&img);
        assert_eq!(img.pixels, vec![1, 2, 3]);
    }

    #[test]
    fn test_grayscale_empty_image() {
        let img = PixelBuffer::new(0, 0, vec![]);
        assert!(apply_grayscale(&img).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn image_strategy() -> impl Strategy<Value = PixelBuffer> {
        (1u32..=24, 1u32..=24).prop_flat_map(|(w, h)| {
            let len = (w * h * 3) as usize;
            prop::collection::vec(any::<u8>(), len..=len)
                .prop_map(move |pixels| PixelBuffer::new(w, h, pixels))
        })
    }

    proptest! {
        /// Property: A second grayscale pass changes nothing.
        #[test]
        fn prop_grayscale_is_idempotent(img in image_strategy()) {
            let once = apply_grayscale(&img);
            let twice = apply_grayscale(&once);
            prop_assert_eq!(once, twice);
        }

        /// Property: Shape is preserved.
        #[test]
        fn prop_grayscale_preserves_shape(img in image_strategy()) {
            let gray = apply_grayscale(&img);
            prop_assert_eq!((gray.width, gray.height), (img.width, img.height));
            prop_assert_eq!(gray.pixels.len(), img.pixels.len());
        }
    }
}
