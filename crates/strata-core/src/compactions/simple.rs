//! The shared pipeline of flip, rotate and canvas enlargement.

use std::sync::Arc;

use kurbo::Affine;

use super::Pending;
use crate::document::Document;
use crate::editor::Editor;
use crate::geometry::Canvas;
use crate::guides::Guides;
use crate::history::Edit;
use crate::layer::Layer;

/// What a layer hook needs to know about the edit in progress.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerContext {
    /// Old image space to new image space.
    pub transform: Affine,
    pub old_canvas: Canvas,
    pub new_canvas: Canvas,
}

/// An edit that transforms every layer by one rule and maps the rest of the
/// document through one transform.
///
/// Implementors provide the hooks; [`run`] provides the pipeline.
pub trait SimpleCompAction {
    fn edit_name(&self) -> String;

    fn affects_canvas_size(&self) -> bool;

    fn disable_for_smart_objects(&self) -> bool;

    /// Old image space to new image space, for a document on `canvas`.
    fn canvas_transform(&self, canvas: &Canvas) -> Affine;

    /// Transform the content and mask of one layer.
    fn transform_layer(&self, layer: &mut Layer, context: &LayerContext);

    /// Only consulted when [`affects_canvas_size`](Self::affects_canvas_size)
    /// is true.
    fn new_canvas(&self, canvas: &Canvas) -> Canvas {
        *canvas
    }

    fn transformed_guides(&self, guides: &Guides, context: &LayerContext) -> Guides {
        guides.transformed(context.transform, &context.old_canvas, &context.new_canvas)
    }

    fn status_message(&self, document: &Document) -> String;

    /// Edits that would change nothing hand back the active document.
    fn is_noop(&self, _document: &Document) -> bool {
        false
    }
}

/// Run `action` against the editor's active document.
#[tracing::instrument(level = "debug", skip_all, fields(edit = %action.edit_name()))]
pub fn run<A: SimpleCompAction + ?Sized>(action: &A, editor: &mut Editor) -> Pending {
    let old = editor.document().clone();
    let name = action.edit_name();

    if action.disable_for_smart_objects() && old.contains_smart_object() {
        tracing::warn!("rejected, the document contains smart objects");
        editor.messages().warning(
            "Feature Not Supported",
            &format!("{name} is not yet supported if the image contains smart objects."),
        );
        return Pending::done(old);
    }
    if action.is_noop(&old) {
        tracing::debug!("nothing to do");
        return Pending::done(old);
    }

    let mut document = old.copy(true);
    let old_canvas = old.canvas();
    let transform = action.canvas_transform(&old_canvas);
    document.transform_selection(transform);

    let affects_canvas_size = action.affects_canvas_size();
    let new_canvas = if affects_canvas_size {
        action.new_canvas(&old_canvas)
    } else {
        old_canvas
    };
    let context = LayerContext {
        transform,
        old_canvas,
        new_canvas,
    };

    document.for_each_layer_mut(|layer| action.transform_layer(layer, &context));

    if affects_canvas_size {
        document.set_canvas(new_canvas);
    }

    if let Some(guides) = old.guides() {
        document.set_guides(Some(action.transformed_guides(guides, &context)));
    }

    document.mark_dirty();
    let document = Arc::new(document);
    let edit = Edit::replace(name, old, document.clone(), transform, affects_canvas_size);
    let document = editor.commit(edit, document);

    let status = action.status_message(&document);
    editor.messages().status(&status);
    tracing::info!(canvas = ?document.canvas(), "edit applied");
    Pending::done(document)
}
