//! Horizontal and vertical mirroring.

use image::imageops;
use kurbo::Affine;
use serde::{Deserialize, Serialize};

use crate::geometry::Canvas;
use crate::raster::{BlankPixel, Buffer};

/// The axis a flip mirrors across.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlipDirection {
    /// Mirror left to right.
    Horizontal,
    /// Mirror top to bottom.
    Vertical,
}

impl FlipDirection {
    /// The name shown in menus and in the history.
    pub fn name(self) -> &'static str {
        match self {
            FlipDirection::Horizontal => "Flip Horizontal",
            FlipDirection::Vertical => "Flip Vertical",
        }
    }

    /// Mirror through the canvas's own width or height, not through zero,
    /// so mirrored content stays inside the frame.
    pub fn canvas_transform(self, canvas: &Canvas) -> Affine {
        match self {
            FlipDirection::Horizontal => {
                Affine::new([-1.0, 0.0, 0.0, 1.0, canvas.width() as f64, 0.0])
            }
            FlipDirection::Vertical => {
                Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, canvas.height() as f64])
            }
        }
    }
}

/// Mirror a whole buffer.
pub fn flip_buffer<P: BlankPixel>(image: &Buffer<P>, direction: FlipDirection) -> Buffer<P> {
    match direction {
        FlipDirection::Horizontal => imageops::flip_horizontal(image),
        FlipDirection::Vertical => imageops::flip_vertical(image),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Luma};
    use kurbo::Point;

    #[test]
    fn test_horizontal_transform() {
        let t = FlipDirection::Horizontal.canvas_transform(&Canvas::new(20, 10));
        assert_eq!(t * Point::new(0.0, 3.0), Point::new(20.0, 3.0));
        assert_eq!(t * Point::new(5.0, 3.0), Point::new(15.0, 3.0));
    }

    #[test]
    fn test_vertical_transform() {
        let t = FlipDirection::Vertical.canvas_transform(&Canvas::new(20, 10));
        assert_eq!(t * Point::new(4.0, 0.0), Point::new(4.0, 10.0));
    }

    #[test]
    fn test_transform_is_involution() {
        let canvas = Canvas::new(33, 17);
        for direction in [FlipDirection::Horizontal, FlipDirection::Vertical] {
            let t = direction.canvas_transform(&canvas);
            assert_eq!(t * t, Affine::IDENTITY);
        }
    }

    #[test]
    fn test_flip_buffer() {
        let img: Buffer<Luma<u8>> = ImageBuffer::from_fn(3, 2, |x, y| Luma([(y * 3 + x) as u8]));

        let h = flip_buffer(&img, FlipDirection::Horizontal);
        assert_eq!(h.get_pixel(0, 0), &Luma([2]));

        let v = flip_buffer(&img, FlipDirection::Vertical);
        assert_eq!(v.get_pixel(0, 0), &Luma([3]));
    }

    #[test]
    fn test_names() {
        assert_eq!(FlipDirection::Horizontal.name(), "Flip Horizontal");
        assert_eq!(FlipDirection::Vertical.name(), "Flip Vertical");
    }
}
