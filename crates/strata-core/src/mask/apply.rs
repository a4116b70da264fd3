//! Hiding mask application
//!
//! Adds a selection-derived mask to layers, combining it with any mask a
//! layer already carries.

use image::{ImageBuffer, Luma};

use super::{mask_from_selection, LayerMask};
use crate::geometry::Canvas;
use crate::layer::Layer;
use crate::raster::Raster;
use crate::selection::Selection;

/// Combine two masks so that only the area revealed by both stays revealed.
///
/// The result spans both masks. Outside its own buffer a mask reveals, so
/// each mask only restricts the area it actually covers.
pub fn intersect_masks(existing: &LayerMask, added: &LayerMask) -> LayerMask {
    let area = existing.bounds().union(&added.bounds());
    let image = ImageBuffer::from_fn(area.width as u32, area.height as u32, |x, y| {
        let ix = area.x + x as i32;
        let iy = area.y + y as i32;
        let a = existing.sample(ix, iy).0[0];
        let b = added.sample(ix, iy).0[0];
        Luma([a.min(b)])
    });
    Raster::new(image, area.x, area.y)
}

/// Hide everything outside `selection` on each of `layers` (top level only;
/// a group's mask covers its children).
///
/// Returns the number of layers that received a mask.
pub fn add_hiding_mask(layers: &mut [Layer], selection: &Selection, canvas: Canvas) -> usize {
    let hiding = mask_from_selection(selection, canvas);
    for layer in layers.iter_mut() {
        let combined = match &layer.mask {
            Some(existing) => intersect_masks(existing, &hiding),
            None => hiding.clone(),
        };
        layer.mask = Some(combined);
    }
    layers.len()
}
