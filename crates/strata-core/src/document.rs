//! The layered document a composition edit works on.

use kurbo::Affine;

use crate::geometry::{Canvas, IntRect};
use crate::guides::Guides;
use crate::layer::{Layer, LayerId};
use crate::selection::Selection;

/// An ordered stack of layers on a canvas, with the selection and guides
/// that live in its image space.
///
/// Structural edits never change a document that is on screen: they work on
/// a [`Document::copy`] and swap the copy in. Copies share pixel buffers
/// until one side replaces them.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    layers: Vec<Layer>,
    canvas: Canvas,
    selection: Option<Selection>,
    guides: Option<Guides>,
    dirty: bool,
}

impl Document {
    pub fn new(name: impl Into<String>, canvas: Canvas) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
            canvas,
            selection: None,
            guides: None,
            dirty: false,
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.set_selection(Some(selection));
        self
    }

    pub fn with_guides(mut self, guides: Guides) -> Self {
        self.guides = Some(guides);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut Vec<Layer> {
        &mut self.layers
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn set_canvas(&mut self, canvas: Canvas) {
        self.canvas = canvas;
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }

    /// Install a selection. An empty selection is the same as none.
    pub fn set_selection(&mut self, selection: Option<Selection>) {
        self.selection = selection.filter(|s| !s.is_empty());
    }

    pub fn deselect(&mut self) {
        self.selection = None;
    }

    pub fn guides(&self) -> Option<&Guides> {
        self.guides.as_ref()
    }

    pub fn set_guides(&mut self, guides: Option<Guides>) {
        self.guides = guides;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// A copy for an edit to work on, optionally without the selection.
    pub fn copy(&self, keep_selection: bool) -> Document {
        let mut copy = self.clone();
        if !keep_selection {
            copy.selection = None;
        }
        copy
    }

    /// Visit every layer, parents before their children.
    pub fn for_each_layer(&self, mut f: impl FnMut(&Layer)) {
        fn visit(layers: &[Layer], f: &mut impl FnMut(&Layer)) {
            for layer in layers {
                f(layer);
                visit(layer.children(), f);
            }
        }
        visit(&self.layers, &mut f);
    }

    /// Visit every layer mutably, parents before their children.
    pub fn for_each_layer_mut(&mut self, mut f: impl FnMut(&mut Layer)) {
        fn visit(layers: &mut [Layer], f: &mut impl FnMut(&mut Layer)) {
            for layer in layers {
                f(&mut *layer);
                if let Some(children) = layer.children_mut() {
                    visit(children, f);
                }
            }
        }
        visit(&mut self.layers, &mut f);
    }

    pub fn find_layer(&self, id: LayerId) -> Option<&Layer> {
        fn search(layers: &[Layer], id: LayerId) -> Option<&Layer> {
            layers.iter().find_map(|layer| {
                if layer.id() == id {
                    Some(layer)
                } else {
                    search(layer.children(), id)
                }
            })
        }
        search(&self.layers, id)
    }

    pub fn layer_count(&self) -> usize {
        let mut count = 0;
        self.for_each_layer(|_| count += 1);
        count
    }

    pub fn contains_smart_object(&self) -> bool {
        let mut found = false;
        self.for_each_layer(|layer| found |= layer.is_smart_object());
        found
    }

    /// The union of the content bounds of every layer and mask, or `None`
    /// when no layer has content.
    pub fn content_bounds(&self) -> Option<IntRect> {
        let mut bounds: Option<IntRect> = None;
        self.for_each_layer(|layer| {
            let areas = layer
                .content_bounds()
                .into_iter()
                .chain(layer.mask.as_ref().map(|m| m.bounds()));
            for area in areas {
                bounds = Some(match bounds {
                    Some(b) => b.union(&area),
                    None => area,
                });
            }
        });
        bounds
    }

    /// Move the selection into a new image space, dropping it if nothing is
    /// left.
    pub fn transform_selection(&mut self, transform: Affine) {
        let moved = self.selection.take().map(|s| s.transformed(transform));
        self.set_selection(moved);
    }

    /// Clip the selection to `rect`, dropping it if nothing is left.
    pub fn intersect_selection(&mut self, rect: IntRect) {
        let clipped = self
            .selection
            .take()
            .and_then(|s| s.intersected(rect.to_rect()));
        self.set_selection(clipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;
    use image::{Luma, Rgba};
    use kurbo::Rect;

    fn sample_document() -> Document {
        let pixel = Rgba([10, 20, 30, 255]);
        let nested = Layer::image("nested", Raster::filled(4, 4, pixel).with_translation(30, 2));
        Document::new("sample", Canvas::new(20, 10))
            .with_layer(Layer::image("background", Raster::filled(20, 10, pixel)))
            .with_layer(Layer::group("group", vec![nested, Layer::adjustment("levels")]))
            .with_selection(Selection::rectangle(Rect::new(2.0, 2.0, 6.0, 4.0)))
    }

    #[test]
    fn test_copy_shares_pixels() {
        let doc = sample_document();
        let copy = doc.copy(true);
        let a = doc.layers()[0].raster().unwrap();
        let b = copy.layers()[0].raster().unwrap();
        assert!(a.shares_pixels_with(b));
        assert_eq!(copy.layers()[0].id(), doc.layers()[0].id());
        assert!(copy.has_selection());
        assert!(!doc.copy(false).has_selection());
    }

    #[test]
    fn test_depth_first_order() {
        let doc = sample_document();
        let mut names = Vec::new();
        doc.for_each_layer(|layer| names.push(layer.name.clone()));
        assert_eq!(names, ["background", "group", "nested", "levels"]);
        assert_eq!(doc.layer_count(), 4);
    }

    #[test]
    fn test_find_nested_layer() {
        let doc = sample_document();
        let id = doc.layers()[1].children()[0].id();
        assert_eq!(doc.find_layer(id).map(|l| l.name.as_str()), Some("nested"));
    }

    #[test]
    fn test_content_bounds_include_masks() {
        let mut doc = sample_document();
        doc.layers_mut()[0].mask = Some(Raster::filled(2, 2, Luma([255])).with_translation(-3, -1));
        assert_eq!(doc.content_bounds(), Some(IntRect::new(-3, -1, 37, 11)));
    }

    #[test]
    fn test_smart_object_detection() {
        let mut doc = sample_document();
        assert!(!doc.contains_smart_object());
        let preview = Raster::filled(2, 2, Rgba([0, 0, 0, 255]));
        let smart = Layer::smart_object("so", "inner.pxc", preview);
        if let Some(children) = doc.layers_mut()[1].children_mut() {
            children.push(smart);
        }
        assert!(doc.contains_smart_object());
    }

    #[test]
    fn test_selection_outside_rect_is_dropped() {
        let mut doc = sample_document();
        doc.intersect_selection(IntRect::new(10, 0, 10, 10));
        assert!(!doc.has_selection());
    }

    #[test]
    fn test_transform_selection() {
        let mut doc = sample_document();
        doc.transform_selection(Affine::translate((2.0, 3.0)));
        assert_eq!(doc.selection().unwrap().bounds(), Rect::new(4.0, 5.0, 8.0, 7.0));
    }
}
