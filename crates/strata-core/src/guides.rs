//! Guide lines.
//!
//! Positions are fractions of the canvas size, so a pure resize leaves them
//! untouched. Every other edit maps each line through the edit's transform.

use kurbo::{Affine, Point};
use serde::{Deserialize, Serialize};

use crate::geometry::Canvas;

/// Horizontal and vertical guide lines, relative to the canvas.
///
/// `horizontals` are y positions as a fraction of the canvas height,
/// `verticals` are x positions as a fraction of the canvas width.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Guides {
    horizontals: Vec<f64>,
    verticals: Vec<f64>,
}

impl Guides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontals(&self) -> &[f64] {
        &self.horizontals
    }

    pub fn verticals(&self) -> &[f64] {
        &self.verticals
    }

    pub fn is_empty(&self) -> bool {
        self.horizontals.is_empty() && self.verticals.is_empty()
    }

    pub fn clear(&mut self) {
        self.horizontals.clear();
        self.verticals.clear();
    }

    pub fn add_horizontal_relative(&mut self, fraction: f64) {
        self.horizontals.push(fraction);
    }

    pub fn add_horizontal_absolute(&mut self, y: i32, canvas: &Canvas) {
        self.horizontals.push(y as f64 / canvas.height() as f64);
    }

    pub fn add_vertical_relative(&mut self, fraction: f64) {
        self.verticals.push(fraction);
    }

    pub fn add_vertical_absolute(&mut self, x: i32, canvas: &Canvas) {
        self.verticals.push(x as f64 / canvas.width() as f64);
    }

    /// Lines dividing the canvas into equal rows and columns.
    pub fn add_relative_grid(&mut self, rows: u32, columns: u32) {
        for i in 1..rows {
            self.horizontals.push(i as f64 / rows as f64);
        }
        for i in 1..columns {
            self.verticals.push(i as f64 / columns as f64);
        }
    }

    /// `count` lines spaced `spacing` pixels apart, starting one spacing in
    /// from the top and from the left.
    pub fn add_absolute_grid(&mut self, count: u32, spacing: u32, canvas: &Canvas) {
        for i in 1..=count {
            let offset = (i * spacing) as i32;
            self.add_horizontal_absolute(offset, canvas);
            self.add_vertical_absolute(offset, canvas);
        }
    }

    /// Pixel positions of the lines on `canvas`, as (horizontal y values,
    /// vertical x values).
    pub fn positions(&self, canvas: &Canvas) -> (Vec<f64>, Vec<f64>) {
        let ys = self
            .horizontals
            .iter()
            .map(|h| h * canvas.height() as f64)
            .collect();
        let xs = self
            .verticals
            .iter()
            .map(|v| v * canvas.width() as f64)
            .collect();
        (ys, xs)
    }

    /// Map every line through `transform`, from `old_canvas` image space to
    /// `new_canvas` image space.
    ///
    /// A quarter turn turns horizontal lines into vertical ones and the other
    /// way round. Lines that end up outside the new canvas are dropped.
    pub fn transformed(&self, transform: Affine, old_canvas: &Canvas, new_canvas: &Canvas) -> Self {
        let mut result = Guides::new();
        let (ys, xs) = self.positions(old_canvas);

        for y in ys {
            let (a, b) = (Point::new(0.0, y), Point::new(1.0, y));
            result.place_line(transform * a, transform * b, new_canvas);
        }
        for x in xs {
            let (a, b) = (Point::new(x, 0.0), Point::new(x, 1.0));
            result.place_line(transform * a, transform * b, new_canvas);
        }
        result
    }

    /// Add the axis-aligned line through `a` and `b`.
    fn place_line(&mut self, a: Point, b: Point, canvas: &Canvas) {
        let (list, fraction) = if (a.y - b.y).abs() < 1e-9 {
            (&mut self.horizontals, a.y / canvas.height() as f64)
        } else {
            (&mut self.verticals, a.x / canvas.width() as f64)
        };
        if (-1e-9..=1.0 + 1e-9).contains(&fraction) {
            list.push(fraction.clamp(0.0, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntRect;
    use crate::outsets::Outsets;
    use crate::transform::{crop_transform, FlipDirection, QuadrantAngle};

    fn approx(a: &[f64], b: &[f64]) -> bool {
        a.len() == b.len() && a.iter().zip(b).all(|(x, y)| (x - y).abs() < 1e-9)
    }

    fn sample_guides(canvas: &Canvas) -> Guides {
        let mut guides = Guides::new();
        guides.add_horizontal_absolute(4, canvas);
        guides.add_vertical_absolute(5, canvas);
        guides
    }

    #[test]
    fn test_absolute_positions() {
        let canvas = Canvas::new(20, 10);
        let guides = sample_guides(&canvas);
        assert!(approx(guides.horizontals(), &[0.4]));
        assert!(approx(guides.verticals(), &[0.25]));
        let (ys, xs) = guides.positions(&canvas);
        assert!(approx(&ys, &[4.0]));
        assert!(approx(&xs, &[5.0]));
    }

    #[test]
    fn test_relative_grid() {
        let mut guides = Guides::new();
        guides.add_relative_grid(4, 2);
        assert!(approx(guides.horizontals(), &[0.25, 0.5, 0.75]));
        assert!(approx(guides.verticals(), &[0.5]));
    }

    #[test]
    fn test_absolute_grid() {
        let canvas = Canvas::new(20, 10);
        let mut guides = Guides::new();
        guides.add_absolute_grid(2, 5, &canvas);
        assert!(approx(guides.horizontals(), &[0.5, 1.0]));
        assert!(approx(guides.verticals(), &[0.25, 0.5]));
    }

    #[test]
    fn test_flip_mirrors_verticals() {
        let canvas = Canvas::new(20, 10);
        let guides = sample_guides(&canvas);
        let t = FlipDirection::Horizontal.canvas_transform(&canvas);
        let flipped = guides.transformed(t, &canvas, &canvas);
        assert!(approx(flipped.verticals(), &[0.75]));
        assert!(approx(flipped.horizontals(), &[0.4]));
    }

    #[test]
    fn test_rotation_swaps_orientation() {
        let canvas = Canvas::new(20, 10);
        let guides = sample_guides(&canvas);
        let angle = QuadrantAngle::Deg90;
        let rotated_canvas = angle.rotated_canvas(&canvas);
        let rotated = guides.transformed(angle.canvas_transform(&canvas), &canvas, &rotated_canvas);

        // y = 4 becomes x = 10 - 4 on the 10x20 canvas
        assert!(approx(rotated.verticals(), &[0.6]));
        // x = 5 becomes y = 5
        assert!(approx(rotated.horizontals(), &[0.25]));
    }

    #[test]
    fn test_crop_drops_lines_outside() {
        let canvas = Canvas::new(20, 10);
        let guides = sample_guides(&canvas);
        let rect = IntRect::new(10, 3, 10, 3);
        let new_canvas = Canvas::new(10, 3);
        let cropped = guides.transformed(crop_transform(rect), &canvas, &new_canvas);

        // y = 4 becomes y = 1 of 3; x = 5 is left of the crop
        assert!(approx(cropped.horizontals(), &[1.0 / 3.0]));
        assert!(cropped.verticals().is_empty());
    }

    #[test]
    fn test_enlarge_shifts_lines() {
        let canvas = Canvas::new(20, 10);
        let guides = sample_guides(&canvas);
        let outsets = Outsets::new(5, 0, 5, 20);
        let new_canvas = outsets.enlarged_canvas(&canvas);
        let enlarged = guides.transformed(outsets.canvas_transform(), &canvas, &new_canvas);

        assert!(approx(enlarged.horizontals(), &[9.0 / 20.0]));
        assert!(approx(enlarged.verticals(), &[5.0 / 40.0]));
    }
}
