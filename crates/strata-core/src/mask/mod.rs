//! Layer masks built from selections.
//!
//! A mask is a grayscale raster positioned like any other layer content:
//! 255 reveals the layer, 0 hides it. Masks are built by evaluating the
//! selection at each pixel center of the canvas.
//!
//! ## Hiding masks
//!
//! Hiding the area outside a selection adds a mask to every top-level layer.
//! A layer that already has a mask keeps only what both masks reveal.

pub mod apply;

pub use apply::{add_hiding_mask, intersect_masks};

use image::{ImageBuffer, Luma};
use kurbo::Point;

use crate::geometry::Canvas;
use crate::raster::Raster;
use crate::selection::Selection;

/// Grayscale layer mask.
pub type LayerMask = Raster<Luma<u8>>;

/// Fully revealing value.
pub const REVEAL: u8 = 255;
/// Fully hiding value.
pub const HIDE: u8 = 0;

/// Rasterize a selection into a canvas-sized mask that reveals the selected
/// area only.
pub fn mask_from_selection(selection: &Selection, canvas: Canvas) -> LayerMask {
    let image = ImageBuffer::from_fn(canvas.width(), canvas.height(), |x, y| {
        // Evaluate at the pixel center
        let center = Point::new(x as f64 + 0.5, y as f64 + 0.5);
        if selection.contains(center) {
            Luma([REVEAL])
        } else {
            Luma([HIDE])
        }
    });
    Raster::new(image, 0, 0)
}
