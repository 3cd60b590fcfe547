//! Synthetic gradient images for smoke-testing a conversion.

use image::{GrayImage, Luma};
use tracing::debug;

/// Create a diagonal ramp from 0 at the top-left corner to 255 at the
/// bottom-right corner.
///
/// A 1x1 image is a single black pixel.
pub fn gradient(width: u32, height: u32) -> GrayImage {
    debug!(width, height, "Generating gradient image");

    GrayImage::from_fn(width, height, |x, y| Luma([ramp(x, y, width, height)]))
}

/// Level of pixel `(x, y)` in a `width` x `height` ramp.
fn ramp(x: u32, y: u32, width: u32, height: u32) -> u8 {
    let span = (u64::from(width) + u64::from(height)).saturating_sub(2);
    if span == 0 {
        return 0;
    }
    ((u64::from(x) + u64::from(y)) * 255 / span) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_corners() {
        let img = gradient(10, 6);
        assert_eq!(img.dimensions(), (10, 6));
        assert_eq!(img.get_pixel(0, 0).0[0], 0);
        assert_eq!(img.get_pixel(9, 5).0[0], 255);
    }

    #[test]
    fn test_gradient_is_monotonic_along_rows() {
        let img = gradient(32, 4);
        for y in 0..4 {
            for x in 1..32 {
                assert!(img.get_pixel(x, y).0[0] >= img.get_pixel(x - 1, y).0[0]);
            }
        }
    }

    #[test]
    fn test_gradient_degenerate_sizes() {
        assert_eq!(gradient(1, 1).get_pixel(0, 0).0[0], 0);
        assert_eq!(gradient(0, 0).dimensions(), (0, 0));
        assert_eq!(gradient(0, 7).dimensions(), (0, 7));
    }

    #[test]
    fn test_ramp_does_not_wrap_on_huge_dimensions() {
        let max = u32::MAX;
        assert_eq!(ramp(0, 0, max, 2), 0);
        assert_eq!(ramp(max - 1, 1, max, 2), 255);
        assert_eq!(ramp(max / 2, 0, max, max), 63);
        assert_eq!(ramp(max - 1, max - 1, max, max), 255);
    }

    #[test]
    fn test_gradient_full_size_covers_range() {
        let img = gradient(1000, 1000);
        let min = img.as_raw().iter().copied().min();
        let max = img.as_raw().iter().copied().max();
        assert_eq!((min, max), (Some(0), Some(255)));
    }
}
