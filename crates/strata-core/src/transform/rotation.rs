//! Quarter-turn rotation.
//!
//! Rotations are clockwise by 90, 180 or 270 degrees. Quarter turns map
//! pixel centers onto pixel centers, so no interpolation is needed and the
//! transform coefficients are exact.
//!
//! # Algorithm
//!
//! Each rotation is a rotation about the origin followed by a translation
//! that brings the rotated canvas back into the positive quadrant:
//!
//! ```text
//!  90°: (x, y) -> (H - y, x)
//! 180°: (x, y) -> (W - x, H - y)
//! 270°: (x, y) -> (y, W - x)
//! ```
//!
//! where `W` and `H` are the canvas dimensions before the rotation.

use image::imageops;
use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::geometry::Canvas;
use crate::raster::{BlankPixel, Buffer};

/// A clockwise rotation by a multiple of 90 degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuadrantAngle {
    Deg90,
    Deg180,
    Deg270,
}

impl QuadrantAngle {
    pub fn degrees(self) -> u32 {
        match self {
            QuadrantAngle::Deg90 => 90,
            QuadrantAngle::Deg180 => 180,
            QuadrantAngle::Deg270 => 270,
        }
    }

    /// The name shown in menus and in the history.
    pub fn name(self) -> &'static str {
        match self {
            QuadrantAngle::Deg90 => "Rotate 90° CW",
            QuadrantAngle::Deg180 => "Rotate 180°",
            QuadrantAngle::Deg270 => "Rotate 90° CCW",
        }
    }

    /// The rotation that undoes this one.
    pub fn inverse(self) -> Self {
        match self {
            QuadrantAngle::Deg90 => QuadrantAngle::Deg270,
            QuadrantAngle::Deg180 => QuadrantAngle::Deg180,
            QuadrantAngle::Deg270 => QuadrantAngle::Deg90,
        }
    }

    /// Returns true if this rotation swaps width and height.
    #[inline]
    pub fn swaps_dimensions(self) -> bool {
        matches!(self, QuadrantAngle::Deg90 | QuadrantAngle::Deg270)
    }

    /// The canvas after the rotation.
    pub fn rotated_canvas(self, canvas: &Canvas) -> Canvas {
        if self.swaps_dimensions() {
            canvas.transposed()
        } else {
            *canvas
        }
    }

    /// The image-space transform for a canvas of the given size.
    pub fn canvas_transform(self, canvas: &Canvas) -> Affine {
        let w = canvas.width() as f64;
        let h = canvas.height() as f64;
        match self {
            QuadrantAngle::Deg90 => Affine::new([0.0, 1.0, -1.0, 0.0, h, 0.0]),
            QuadrantAngle::Deg180 => Affine::new([-1.0, 0.0, 0.0, -1.0, w, h]),
            QuadrantAngle::Deg270 => Affine::new([0.0, -1.0, 1.0, 0.0, 0.0, w]),
        }
    }
}

/// Rotate a whole buffer.
pub fn rotate_buffer<P: BlankPixel>(image: &Buffer<P>, angle: QuadrantAngle) -> Buffer<P> {
    match angle {
        QuadrantAngle::Deg90 => imageops::rotate90(image),
        QuadrantAngle::Deg180 => imageops::rotate180(image),
        QuadrantAngle::Deg270 => imageops::rotate270(image),
    }
}
