//! Crop transform and buffer cropping.
//!
//! A crop keeps the pixels inside a rectangle given in image space and moves
//! the rectangle's origin to `(0, 0)`.
//!
//! # Example
//!
//! ```ignore
//! // Keep the 10x3 block starting at (10, 3)
//! let transform = crop_transform(IntRect::new(10, 3, 10, 3));
//! assert_eq!(transform * Point::new(10.0, 3.0), Point::ORIGIN);
//! ```

use image::{imageops, ImageBuffer};
use kurbo::Affine;

use crate::geometry::IntRect;
use crate::raster::{BlankPixel, Buffer};

/// The transform describing how the image-space coordinates of a surviving
/// pixel change after cropping to `rect`.
pub fn crop_transform(rect: IntRect) -> Affine {
    Affine::translate((-(rect.x as f64), -(rect.y as f64)))
}

/// Copy the part of `image` under `rect` into a new buffer of exactly the
/// rectangle's size.
///
/// `rect` is relative to the buffer's own top-left corner and may extend past
/// its edges (or lie completely outside); uncovered pixels are blank.
///
/// # Behavior
///
/// - Output size always equals the rectangle size (minimum 1x1)
/// - A rectangle equal to the buffer bounds returns a copy of the buffer
pub fn crop_buffer<P: BlankPixel>(image: &Buffer<P>, rect: IntRect) -> Buffer<P> {
    let out_width = rect.width.max(1) as u32;
    let out_height = rect.height.max(1) as u32;

    // Fast path: full crop returns a clone
    if rect.x == 0 && rect.y == 0 && out_width == image.width() && out_height == image.height() {
        return image.clone();
    }

    let mut output = ImageBuffer::from_pixel(out_width, out_height, P::blank());
    imageops::replace(&mut output, image, -(rect.x as i64), -(rect.y as i64));
    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
