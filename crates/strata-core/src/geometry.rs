//! Canvas and integer rectangle types.
//!
//! All coordinates are in image space: pixels relative to the canvas origin,
//! independent of any on-screen zoom.

use kurbo::{Affine, Rect};
use serde::{Deserialize, Serialize};

/// The nominal size of a document, defining its visible/output bounds.
///
/// A canvas is a plain value. Edits install a new canvas instead of resizing
/// the one still referenced by the pre-edit document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canvas {
    width: u32,
    height: u32,
}

impl Canvas {
    /// Create a canvas. Both dimensions must be at least 1.
    pub fn new(width: u32, height: u32) -> Self {
        debug_assert!(width > 0 && height > 0, "empty canvas {width}x{height}");
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// The canvas area as a rectangle anchored at the origin.
    pub fn bounds(&self) -> IntRect {
        IntRect::new(0, 0, self.width as i32, self.height as i32)
    }

    /// The same size with width and height exchanged.
    pub fn transposed(&self) -> Self {
        Self::new(self.height, self.width)
    }
}

/// An axis-aligned rectangle with integer coordinates.
///
/// Width and height are never negative; a rectangle with a zero dimension is
/// empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl IntRect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: width.max(0),
            height: height.max(0),
        }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// The overlapping part of two rectangles, empty if they are disjoint.
    pub fn intersection(&self, other: &IntRect) -> IntRect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        IntRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// The smallest rectangle containing both.
    pub fn union(&self, other: &IntRect) -> IntRect {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x0 = self.x.min(other.x);
        let y0 = self.y.min(other.y);
        let x1 = self.right().max(other.right());
        let y1 = self.bottom().max(other.bottom());
        IntRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    pub fn contains_rect(&self, other: &IntRect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    pub fn to_rect(self) -> Rect {
        Rect::new(
            self.x as f64,
            self.y as f64,
            self.right() as f64,
            self.bottom() as f64,
        )
    }

    /// Round a fractional rectangle to whole pixels.
    ///
    /// Origin and size are rounded independently. Fractional sizes appear in
    /// zoomed-in views; a size that rounds to zero becomes one pixel.
    pub fn round_from(rect: Rect) -> IntRect {
        let rect = rect.abs();
        let width = (rect.width().round() as i32).max(1);
        let height = (rect.height().round() as i32).max(1);
        IntRect::new(rect.x0.round() as i32, rect.y0.round() as i32, width, height)
    }

    /// The rounded bounding box of a fractional rectangle, without the
    /// one-pixel minimum of [`IntRect::round_from`].
    pub fn from_rect_bounds(rect: Rect) -> IntRect {
        let rect = rect.abs();
        let x0 = rect.x0.round() as i32;
        let y0 = rect.y0.round() as i32;
        let x1 = rect.x1.round() as i32;
        let y1 = rect.y1.round() as i32;
        IntRect::new(x0, y0, x1 - x0, y1 - y0)
    }

    /// Map the rectangle through a transform and return the rounded bounding
    /// box of the result.
    pub fn transformed(&self, transform: Affine) -> IntRect {
        IntRect::from_rect_bounds(transform.transform_rect_bbox(self.to_rect()))
    }
}
