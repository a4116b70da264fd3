//! Four-sided canvas margins.

use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::geometry::{Canvas, IntRect};

/// Margins added around the canvas by an enlargement.
///
/// Positive values grow the canvas outwards. Negative values only appear as
/// intermediate results, for example when a crop is expressed as a negative
/// enlargement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Outsets {
    pub top: i32,
    pub left: i32,
    pub bottom: i32,
    pub right: i32,
}

impl Outsets {
    pub fn new(top: i32, left: i32, bottom: i32, right: i32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same margin on every side.
    pub fn uniform(amount: i32) -> Self {
        Self::new(amount, amount, amount, amount)
    }

    /// The margins between `rect` and the canvas edges, expressed as an
    /// enlargement (so they are negative for a rectangle inside the canvas).
    pub fn from_crop(rect: IntRect, canvas: &Canvas) -> Self {
        Self {
            top: -rect.y,
            left: -rect.x,
            bottom: rect.bottom() - canvas.height() as i32,
            right: rect.right() - canvas.width() as i32,
        }
    }

    pub fn negated(&self) -> Self {
        Self::new(-self.top, -self.left, -self.bottom, -self.right)
    }

    pub fn is_zero(&self) -> bool {
        self.top == 0 && self.left == 0 && self.bottom == 0 && self.right == 0
    }

    /// Grow the margins so that `content`, positioned on `canvas`, fits
    /// inside the enlarged canvas. Margins are never reduced.
    pub fn grow_to_fit(&mut self, content: IntRect, canvas: &Canvas) {
        if content.x < -self.left {
            self.left = -content.x;
        }
        if content.y < -self.top {
            self.top = -content.y;
        }
        let overhang_right = content.right() - canvas.width() as i32;
        if overhang_right > self.right {
            self.right = overhang_right;
        }
        let overhang_bottom = content.bottom() - canvas.height() as i32;
        if overhang_bottom > self.bottom {
            self.bottom = overhang_bottom;
        }
    }

    /// The canvas after adding the margins.
    pub fn enlarged_canvas(&self, canvas: &Canvas) -> Canvas {
        let width = canvas.width() as i32 + self.left + self.right;
        let height = canvas.height() as i32 + self.top + self.bottom;
        Canvas::new(width.max(1) as u32, height.max(1) as u32)
    }

    /// Content moves by the left and top margins.
    pub fn canvas_transform(&self) -> Affine {
        Affine::translate((self.left as f64, self.top as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negation_and_zero() {
        let outsets = Outsets::new(3, 2, 5, 4);
        assert_eq!(outsets.negated(), Outsets::new(-3, -2, -5, -4));
        assert_eq!(outsets.negated().negated(), outsets);
        assert!(!outsets.is_zero());
        assert!(Outsets::default().is_zero());
        assert_eq!(Outsets::uniform(2), Outsets::new(2, 2, 2, 2));
    }

    #[test]
    fn test_enlarged_canvas() {
        let canvas = Canvas::new(20, 10);
        let outsets = Outsets::new(3, 2, 5, 4);
        assert_eq!(outsets.enlarged_canvas(&canvas), Canvas::new(26, 18));
    }

    #[test]
    fn test_from_crop_is_negative_enlargement() {
        let canvas = Canvas::new(20, 10);
        let rect = IntRect::new(10, 3, 5, 3);
        let outsets = Outsets::from_crop(rect, &canvas);
        assert_eq!(outsets, Outsets::new(-3, -10, -4, -5));
        assert_eq!(outsets.enlarged_canvas(&canvas), Canvas::new(5, 3));
    }

    #[test]
    fn test_grow_to_fit() {
        let canvas = Canvas::new(20, 10);
        let mut outsets = Outsets::new(1, 1, 1, 1);
        outsets.grow_to_fit(IntRect::new(-4, -2, 30, 10), &canvas);
        assert_eq!(outsets, Outsets::new(2, 4, 1, 6));
    }

    #[test]
    fn test_grow_to_fit_never_shrinks() {
        let canvas = Canvas::new(20, 10);
        let mut outsets = Outsets::uniform(5);
        outsets.grow_to_fit(IntRect::new(0, 0, 20, 10), &canvas);
        assert_eq!(outsets, Outsets::uniform(5));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
