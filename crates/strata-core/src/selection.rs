//! Selection shapes in image space.
//!
//! A selection is stored as a set of closed polygons. Curved outlines are
//! flattened when the selection is created, which keeps every geometric
//! operation (transforming, clipping, hit testing) a polygon operation.

use kurbo::{Affine, Ellipse, PathEl, Point, Rect, Shape};

use crate::geometry::IntRect;

/// Flattening tolerance for curved outlines, in pixels.
const FLATTEN_TOLERANCE: f64 = 0.1;

/// Polygons with an absolute area below this are treated as degenerate.
const AREA_EPSILON: f64 = 1e-9;

/// A region of the canvas, filled with the even-odd rule.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    polygons: Vec<Vec<Point>>,
    bounds: Rect,
}

impl Selection {
    pub fn rectangle(rect: Rect) -> Self {
        let rect = rect.abs();
        let polygon = vec![
            Point::new(rect.x0, rect.y0),
            Point::new(rect.x1, rect.y0),
            Point::new(rect.x1, rect.y1),
            Point::new(rect.x0, rect.y1),
        ];
        Self::from_polygons(vec![polygon])
    }

    /// An ellipse inscribed in `rect`.
    pub fn ellipse(rect: Rect) -> Self {
        let ellipse = Ellipse::from_rect(rect.abs());
        let mut polygon = Vec::new();
        kurbo::flatten(ellipse.path_elements(FLATTEN_TOLERANCE), FLATTEN_TOLERANCE, |el| {
            match el {
                PathEl::MoveTo(p) | PathEl::LineTo(p) => polygon.push(p),
                _ => {}
            }
        });
        Self::from_polygons(vec![polygon])
    }

    /// A selection from a single outline. Returns `None` for an outline
    /// that encloses no area.
    pub fn polygon(points: Vec<Point>) -> Option<Self> {
        let selection = Self::from_polygons(vec![points]);
        (!selection.is_empty()).then_some(selection)
    }

    fn from_polygons(polygons: Vec<Vec<Point>>) -> Self {
        let polygons: Vec<Vec<Point>> = polygons
            .into_iter()
            .map(dedup_closed)
            .filter(|p| p.len() >= 3 && polygon_area(p).abs() > AREA_EPSILON)
            .collect();
        let bounds = polygons
            .iter()
            .flatten()
            .fold(None, |acc: Option<Rect>, p| match acc {
                None => Some(Rect::from_points(*p, *p)),
                Some(r) => Some(r.union_pt(*p)),
            })
            .unwrap_or(Rect::ZERO);
        Self { polygons, bounds }
    }

    pub fn polygons(&self) -> &[Vec<Point>] {
        &self.polygons
    }

    /// The bounding box of the outline.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// The bounding box rounded to whole pixels.
    pub fn int_bounds(&self) -> IntRect {
        IntRect::round_from(self.bounds)
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    /// True when the shape is exactly its axis-aligned bounding box, in
    /// which case cropping to the bounds needs no hiding mask.
    pub fn is_rectangular(&self) -> bool {
        match self.polygons.as_slice() {
            [polygon] if polygon.len() == 4 => {
                (polygon_area(polygon).abs() - self.bounds.area()).abs() < 1e-6
            }
            _ => false,
        }
    }

    /// Map every vertex through `transform`.
    pub fn transformed(&self, transform: Affine) -> Self {
        let polygons = self
            .polygons
            .iter()
            .map(|polygon| polygon.iter().map(|p| transform * *p).collect())
            .collect();
        Self::from_polygons(polygons)
    }

    /// Clip the selection to `rect`. Returns `None` if nothing is left.
    pub fn intersected(&self, rect: Rect) -> Option<Self> {
        let rect = rect.abs();
        let clipped = self
            .polygons
            .iter()
            .map(|polygon| clip_to_rect(polygon, rect))
            .collect();
        let selection = Self::from_polygons(clipped);
        (!selection.is_empty()).then_some(selection)
    }

    /// Even-odd containment test.
    pub fn contains(&self, point: Point) -> bool {
        if !self.bounds.contains(point) {
            return false;
        }
        let crossings = self
            .polygons
            .iter()
            .filter(|polygon| polygon_contains(polygon, point))
            .count();
        crossings % 2 == 1
    }
}

/// Drop consecutive duplicate vertices, including a closing vertex that
/// repeats the first one.
fn dedup_closed(mut polygon: Vec<Point>) -> Vec<Point> {
    polygon.dedup_by(|a, b| a.distance(*b) < 1e-9);
    while polygon.len() > 1 {
        match (polygon.first(), polygon.last()) {
            (Some(first), Some(last)) if first.distance(*last) < 1e-9 => {
                polygon.pop();
            }
            _ => break,
        }
    }
    polygon
}

/// Signed area by the shoelace formula.
fn polygon_area(polygon: &[Point]) -> f64 {
    let n = polygon.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = polygon[i];
            let b = polygon[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice / 2.0
}

fn polygon_contains(polygon: &[Point], point: Point) -> bool {
    let n = polygon.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

#[derive(Clone, Copy)]
enum Edge {
    Left(f64),
    Right(f64),
    Top(f64),
    Bottom(f64),
}

impl Edge {
    fn inside(self, p: Point) -> bool {
        match self {
            Edge::Left(x) => p.x >= x,
            Edge::Right(x) => p.x <= x,
            Edge::Top(y) => p.y >= y,
            Edge::Bottom(y) => p.y <= y,
        }
    }

    fn crossing(self, a: Point, b: Point) -> Point {
        match self {
            Edge::Left(x) | Edge::Right(x) => {
                let t = (x - a.x) / (b.x - a.x);
                Point::new(x, a.y + t * (b.y - a.y))
            }
            Edge::Top(y) | Edge::Bottom(y) => {
                let t = (y - a.y) / (b.y - a.y);
                Point::new(a.x + t * (b.x - a.x), y)
            }
        }
    }
}

/// Sutherland-Hodgman clipping against each side of `rect` in turn.
fn clip_to_rect(polygon: &[Point], rect: Rect) -> Vec<Point> {
    let edges = [
        Edge::Left(rect.x0),
        Edge::Right(rect.x1),
        Edge::Top(rect.y0),
        Edge::Bottom(rect.y1),
    ];
    let mut output = polygon.to_vec();
    for edge in edges {
        if output.is_empty() {
            break;
        }
        let input = std::mem::take(&mut output);
        let mut previous = input[input.len() - 1];
        for &current in &input {
            match (edge.inside(previous), edge.inside(current)) {
                (true, true) => output.push(current),
                (true, false) => output.push(edge.crossing(previous, current)),
                (false, true) => {
                    output.push(edge.crossing(previous, current));
                    output.push(current);
                }
                (false, false) => {}
            }
            previous = current;
        }
    }
    output
}


// ============================================================================
// Property-Based Tests
// ============================================================================
