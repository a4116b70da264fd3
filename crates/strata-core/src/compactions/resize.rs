//! Resampling the whole document to a new canvas size.
//!
//! The layers are resized on the editor's worker pool, every layer and mask
//! as its own task. The new document is installed on the caller's thread
//! once all of them have finished.

use std::sync::mpsc;
use std::sync::Arc;

use rayon::prelude::*;

use super::{CompAction, Pending};
use crate::document::Document;
use crate::editor::Editor;
use crate::error::EditError;
use crate::geometry::Canvas;
use crate::history::Edit;
use crate::transform::{fit_in_box, scale_transform, FilterType};

/// Resize the document to a target size, or to the largest size with the
/// current proportions that fits a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resize {
    target_width: u32,
    target_height: u32,
    fit_in_box: bool,
}

impl Resize {
    pub const NAME: &'static str = "Resize";

    pub fn new(target_width: u32, target_height: u32, fit_in_box: bool) -> Self {
        Self {
            target_width,
            target_height,
            fit_in_box,
        }
    }

    /// The canvas the document will have after the resize.
    pub fn target_canvas(&self, current: Canvas) -> Result<Canvas, EditError> {
        if self.target_width == 0 || self.target_height == 0 {
            return Err(EditError::InvalidSize {
                width: self.target_width,
                height: self.target_height,
            });
        }
        if self.fit_in_box {
            let (width, height) = fit_in_box(current, self.target_width, self.target_height);
            Ok(Canvas::new(width, height))
        } else {
            Ok(Canvas::new(self.target_width, self.target_height))
        }
    }
}

impl CompAction for Resize {
    fn process(&self, editor: &mut Editor) -> Pending {
        let old = editor.document().clone();
        let old_canvas = old.canvas();

        let target = match self.target_canvas(old_canvas) {
            Ok(target) => target,
            Err(error) => {
                editor.messages().error(&error);
                return Pending::Ready(Err(error));
            }
        };
        if target == old_canvas {
            tracing::debug!(?target, "resize to the current size");
            return Pending::done(old);
        }

        let filter = editor.config().resize_filter;
        let max_dimension = editor.config().max_layer_dimension;
        let (sender, receiver) = mpsc::channel();
        let source = old.clone();
        editor.pool().spawn(move || {
            let result = resize_layers(&source, old_canvas, target, filter, max_dimension);
            if sender.send(result).is_err() {
                tracing::debug!("resize result was not awaited");
            }
        });

        let commit = Box::new(move |editor: &mut Editor, document: Document| {
            finish_resize(editor, old, document, target)
        });
        Pending::InFlight { receiver, commit }
    }
}

/// Copy the document and resample every layer in parallel. Runs on the
/// worker pool; the first failing layer fails the whole resize.
#[tracing::instrument(level = "debug", skip(source), fields(layers = source.layer_count()))]
fn resize_layers(
    source: &Document,
    old_canvas: Canvas,
    target: Canvas,
    filter: FilterType,
    max_dimension: u32,
) -> Result<Document, EditError> {
    let mut document = source.copy(true);
    document
        .layers_mut()
        .par_iter_mut()
        .try_for_each(|layer| layer.resize(old_canvas, target, filter, max_dimension))?;
    Ok(document)
}

/// Install the resized document. Runs on the caller's thread, and only if
/// `old` is still the active document.
fn finish_resize(
    editor: &mut Editor,
    old: Arc<Document>,
    mut document: Document,
    target: Canvas,
) -> Result<Arc<Document>, EditError> {
    if !Arc::ptr_eq(editor.document(), &old) {
        tracing::warn!("active document changed during the resize");
        return Err(EditError::DocumentChanged {
            edit: Resize::NAME.to_string(),
        });
    }

    let transform = scale_transform(old.canvas(), target);
    document.transform_selection(transform);
    document.set_canvas(target);
    // guides are relative to the canvas and need no remapping
    document.mark_dirty();

    let document = Arc::new(document);
    let edit = Edit::replace(Resize::NAME, old, document.clone(), transform, true);
    let document = editor.commit(edit, document);
    editor.messages().status(&format!(
        "{} was resized to {}x{} pixels.",
        document.name(),
        target.width(),
        target.height()
    ));
    tracing::info!(?target, "resized");
    Ok(document)
}
