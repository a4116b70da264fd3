use kurbo::Affine;

use super::simple::{self, LayerContext, SimpleCompAction};
use super::{CompAction, Pending};
use crate::document::Document;
use crate::editor::Editor;
use crate::geometry::{Canvas, IntRect};
use crate::layer::Layer;
use crate::outsets::Outsets;

/// Add margins around the canvas. Pixels are moved, never resampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnlargeCanvas {
    outsets: Outsets,
}

impl EnlargeCanvas {
    pub const NAME: &'static str = "Enlarge Canvas";

    pub fn new(outsets: Outsets) -> Self {
        Self { outsets }
    }

    /// Margins given clockwise from the top.
    pub fn from_margins(north: i32, east: i32, south: i32, west: i32) -> Self {
        Self::new(Outsets::new(north, west, south, east))
    }

    /// Margins given as percentages of the canvas width (east, west) or
    /// height (north, south), truncated to whole pixels.
    pub fn from_percentages(north: f32, east: f32, south: f32, west: f32, canvas: &Canvas) -> Self {
        let w = canvas.width() as f32;
        let h = canvas.height() as f32;
        Self::from_margins(
            (h * north / 100.0) as i32,
            (w * east / 100.0) as i32,
            (h * south / 100.0) as i32,
            (w * west / 100.0) as i32,
        )
    }

    pub fn outsets(&self) -> Outsets {
        self.outsets
    }

    /// Grow the margins so that `content` fits inside the enlarged canvas.
    pub fn ensure_covering(&mut self, content: IntRect, canvas: &Canvas) {
        self.outsets.grow_to_fit(content, canvas);
    }

    pub fn does_nothing(&self) -> bool {
        self.outsets.is_zero()
    }
}

impl SimpleCompAction for EnlargeCanvas {
    fn edit_name(&self) -> String {
        Self::NAME.to_string()
    }

    fn affects_canvas_size(&self) -> bool {
        true
    }

    fn disable_for_smart_objects(&self) -> bool {
        false
    }

    fn canvas_transform(&self, _canvas: &Canvas) -> Affine {
        self.outsets.canvas_transform()
    }

    fn transform_layer(&self, layer: &mut Layer, context: &LayerContext) {
        layer.enlarge(&self.outsets, context.new_canvas);
    }

    fn new_canvas(&self, canvas: &Canvas) -> Canvas {
        self.outsets.enlarged_canvas(canvas)
    }

    fn status_message(&self, document: &Document) -> String {
        let canvas = document.canvas();
        format!(
            "The canvas was enlarged to {} x {} pixels.",
            canvas.width(),
            canvas.height()
        )
    }

    fn is_noop(&self, _document: &Document) -> bool {
        self.does_nothing()
    }
}

impl CompAction for EnlargeCanvas {
    fn process(&self, editor: &mut Editor) -> Pending {
        simple::run(self, editor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_margins_map_to_outsets() {
        let enlarge = EnlargeCanvas::from_margins(3, 4, 5, 2);
        assert_eq!(enlarge.outsets(), Outsets::new(3, 2, 5, 4));
        assert_eq!(enlarge.new_canvas(&Canvas::new(20, 10)), Canvas::new(26, 18));
    }

    #[test]
    fn test_percentages_truncate() {
        let enlarge = EnlargeCanvas::from_percentages(15.0, 10.0, 0.0, 50.0, &Canvas::new(25, 10));
        assert_eq!(enlarge.outsets(), Outsets::new(1, 12, 0, 2));
    }

    #[test]
    fn test_ensure_covering_and_does_nothing() {
        let mut enlarge = EnlargeCanvas::from_margins(0, 0, 0, 0);
        assert!(enlarge.does_nothing());

        enlarge.ensure_covering(IntRect::new(-4, -4, 24, 14), &Canvas::new(20, 10));
        assert!(!enlarge.does_nothing());
        assert_eq!(enlarge.outsets(), Outsets::new(4, 4, 0, 0));
    }
}
