//! Resampling and resize-target arithmetic.
//!
//! Provides the buffer resize used per layer by the resize action, the
//! fit-in-box size computation and the scale transform.

use image::imageops;
use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::geometry::Canvas;
use crate::raster::{BlankPixel, Buffer};

/// Filter type for resampling operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> imageops::FilterType {
        match self {
            FilterType::Nearest => imageops::FilterType::Nearest,
            FilterType::Bilinear => imageops::FilterType::Triangle,
            FilterType::Lanczos3 => imageops::FilterType::Lanczos3,
        }
    }
}

/// Resize a buffer to exact dimensions.
///
/// Dimensions that already match return a copy without resampling.
pub fn resize_buffer<P: BlankPixel>(
    image: &Buffer<P>,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Buffer<P> {
    if image.width() == width && image.height() == height {
        return image.clone();
    }
    imageops::resize(image, width, height, filter.to_image_filter())
}

/// The largest size with the proportions of `current` that fits in the
/// `box_width` x `box_height` box.
///
/// The scale is the tighter of the two ratios, so one dimension equals its
/// bound and the other stays within its bound. Each result is at least 1.
pub fn fit_in_box(current: Canvas, box_width: u32, box_height: u32) -> (u32, u32) {
    let width_scale = box_width as f64 / current.width() as f64;
    let height_scale = box_height as f64 / current.height() as f64;
    let scale = width_scale.min(height_scale);

    let width = ((scale * current.width() as f64).round() as u32).clamp(1, box_width.max(1));
    let height = ((scale * current.height() as f64).round() as u32).clamp(1, box_height.max(1));
    (width, height)
}

/// The transform for resizing `from` to `to`.
pub fn scale_transform(from: Canvas, to: Canvas) -> Affine {
    Affine::scale_non_uniform(
        to.width() as f64 / from.width() as f64,
        to.height() as f64 / from.height() as f64,
    )
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: The result fits the box and touches it on one side.
        #[test]
        fn prop_fit_in_box_fits_and_touches(
            cw in 1u32..=5000,
            ch in 1u32..=5000,
            bw in 1u32..=5000,
            bh in 1u32..=5000,
        ) {
            let (w, h) = fit_in_box(Canvas::new(cw, ch), bw, bh);

            prop_assert!(w <= bw, "width {} exceeds box {}", w, bw);
            prop_assert!(h <= bh, "height {} exceeds box {}", h, bh);
            prop_assert!(w == bw || h == bh, "{}x{} does not touch {}x{}", w, h, bw, bh);
        }

        /// Property: Resizing to a box of the current size changes nothing.
        #[test]
        fn prop_fit_in_own_box_is_identity(cw in 1u32..=5000, ch in 1u32..=5000) {
            prop_assert_eq!(fit_in_box(Canvas::new(cw, ch), cw, ch), (cw, ch));
        }
    }
}
