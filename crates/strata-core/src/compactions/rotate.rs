use kurbo::Affine;

use super::simple::{self, LayerContext, SimpleCompAction};
use super::{CompAction, Pending};
use crate::document::Document;
use crate::editor::Editor;
use crate::geometry::Canvas;
use crate::layer::Layer;
use crate::transform::QuadrantAngle;

/// Rotate the whole document clockwise by a quarter-turn multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rotate {
    angle: QuadrantAngle,
}

impl Rotate {
    pub fn new(angle: QuadrantAngle) -> Self {
        Self { angle }
    }

    pub fn angle(&self) -> QuadrantAngle {
        self.angle
    }
}

impl SimpleCompAction for Rotate {
    fn edit_name(&self) -> String {
        self.angle.name().to_string()
    }

    fn affects_canvas_size(&self) -> bool {
        self.angle.swaps_dimensions()
    }

    fn disable_for_smart_objects(&self) -> bool {
        true
    }

    fn canvas_transform(&self, canvas: &Canvas) -> Affine {
        self.angle.canvas_transform(canvas)
    }

    fn transform_layer(&self, layer: &mut Layer, context: &LayerContext) {
        layer.rotate(self.angle, context.transform);
    }

    fn new_canvas(&self, canvas: &Canvas) -> Canvas {
        self.angle.rotated_canvas(canvas)
    }

    fn status_message(&self, document: &Document) -> String {
        format!(
            "The image was rotated by {}° clockwise, the canvas is now {} x {} pixels.",
            self.angle.degrees(),
            document.canvas().width(),
            document.canvas().height()
        )
    }
}

impl CompAction for Rotate {
    fn process(&self, editor: &mut Editor) -> Pending {
        simple::run(self, editor)
    }
}
