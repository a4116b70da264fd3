use kurbo::Affine;

use super::simple::{self, LayerContext, SimpleCompAction};
use super::{CompAction, Pending};
use crate::document::Document;
use crate::editor::Editor;
use crate::geometry::Canvas;
use crate::layer::Layer;
use crate::transform::FlipDirection;

/// Mirror the whole document. The canvas keeps its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flip {
    direction: FlipDirection,
}

impl Flip {
    pub fn new(direction: FlipDirection) -> Self {
        Self { direction }
    }

    pub fn horizontal() -> Self {
        Self::new(FlipDirection::Horizontal)
    }

    pub fn vertical() -> Self {
        Self::new(FlipDirection::Vertical)
    }
}

impl SimpleCompAction for Flip {
    fn edit_name(&self) -> String {
        self.direction.name().to_string()
    }

    fn affects_canvas_size(&self) -> bool {
        false
    }

    fn disable_for_smart_objects(&self) -> bool {
        true
    }

    fn canvas_transform(&self, canvas: &Canvas) -> Affine {
        self.direction.canvas_transform(canvas)
    }

    fn transform_layer(&self, layer: &mut Layer, context: &LayerContext) {
        layer.flip(self.direction, context.transform);
    }

    fn status_message(&self, _document: &Document) -> String {
        match self.direction {
            FlipDirection::Horizontal => "The image was flipped horizontally.".to_string(),
            FlipDirection::Vertical => "The image was flipped vertically.".to_string(),
        }
    }
}

impl CompAction for Flip {
    fn process(&self, editor: &mut Editor) -> Pending {
        simple::run(self, editor)
    }
}
