//! Cropping, from the crop tool or from the selection.

use std::sync::Arc;

use kurbo::{Affine, Rect};

use super::{CompAction, Pending};
use crate::document::Document;
use crate::editor::Editor;
use crate::error::EditError;
use crate::geometry::{Canvas, IntRect};
use crate::history::Edit;
use crate::mask::add_hiding_mask;
use crate::selection::Selection;
use crate::transform::crop_transform;

/// How to crop to a selection that is not a plain rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionCropChoice {
    /// Crop to the selection bounds and mask out the rest of the shape.
    CropAndHide,
    /// Crop to the selection bounds.
    OnlyCrop,
    /// Keep the canvas, mask out everything outside the selection.
    OnlyHide,
    Cancel,
}

/// Asks the user how a non-rectangular selection crop should proceed.
pub trait SelectionCropPrompt {
    fn choose(&self, selection: &Selection) -> SelectionCropChoice;
}

/// Always gives the same answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedChoice(pub SelectionCropChoice);

impl SelectionCropPrompt for FixedChoice {
    fn choose(&self, _selection: &Selection) -> SelectionCropChoice {
        self.0
    }
}

/// Crop the document to a rectangle in image space.
#[derive(Debug, Clone, PartialEq)]
pub struct Crop {
    rect: Rect,
    from_selection: bool,
    allow_growing: bool,
    delete_cropped_pixels: bool,
    add_hiding_mask: bool,
    tool_crop_box: Option<Rect>,
}

impl Crop {
    pub fn new(
        rect: Rect,
        from_selection: bool,
        allow_growing: bool,
        delete_cropped_pixels: bool,
    ) -> Self {
        Self {
            rect,
            from_selection,
            allow_growing,
            delete_cropped_pixels,
            add_hiding_mask: false,
            tool_crop_box: None,
        }
    }

    /// A crop to the bounds of the selection. With `add_hiding_mask` the
    /// area outside the selection shape is masked out as well.
    pub fn selection(
        rect: Rect,
        allow_growing: bool,
        delete_cropped_pixels: bool,
        add_hiding_mask: bool,
    ) -> Self {
        Self {
            add_hiding_mask,
            ..Self::new(rect, true, allow_growing, delete_cropped_pixels)
        }
    }

    /// A crop confirmed in the interactive crop tool. Undoing it brings the
    /// tool's crop box back.
    pub fn from_tool(rect: Rect, allow_growing: bool, delete_cropped_pixels: bool) -> Self {
        Self {
            tool_crop_box: Some(rect),
            ..Self::new(rect, false, allow_growing, delete_cropped_pixels)
        }
    }

    /// The history name of this crop applied to `document`. Hiding only
    /// counts when there is a selection to hide around.
    pub fn edit_name(&self, document: &Document) -> &'static str {
        if self.hides_outside(document) {
            "Crop and Hide"
        } else {
            "Crop"
        }
    }

    fn hides_outside(&self, document: &Document) -> bool {
        self.add_hiding_mask && document.has_selection()
    }

    /// The whole-pixel rectangle that will be cropped to, or `None` when
    /// nothing of the canvas would be left.
    pub fn crop_rect(&self, canvas: &Canvas) -> Option<IntRect> {
        let mut rect = IntRect::round_from(self.rect);
        if !self.allow_growing {
            rect = rect.intersection(&canvas.bounds());
        }
        (!rect.is_empty()).then_some(rect)
    }
}

impl CompAction for Crop {
    #[tracing::instrument(level = "debug", skip_all, fields(rect = ?self.rect))]
    fn process(&self, editor: &mut Editor) -> Pending {
        let old = editor.document().clone();
        let old_canvas = old.canvas();

        let Some(rect) = self.crop_rect(&old_canvas) else {
            tracing::debug!("crop rectangle is outside the canvas");
            return Pending::done(old);
        };
        let hide = self.hides_outside(&old);
        if rect == old_canvas.bounds() && !hide {
            tracing::debug!("crop covers the whole canvas");
            return Pending::done(old);
        }

        let transform = crop_transform(rect);
        let new_canvas = Canvas::new(rect.width as u32, rect.height as u32);
        let mut document = old.copy(!self.from_selection);

        if let Some(guides) = old.guides() {
            document.set_guides(Some(guides.transformed(transform, &old_canvas, &new_canvas)));
        }
        if !self.from_selection {
            // a tool crop can still have a selection that must be clipped
            document.intersect_selection(rect);
        }

        document.for_each_layer_mut(|layer| {
            layer.crop(rect, self.delete_cropped_pixels, self.allow_growing, new_canvas)
        });
        // only after the layers, which crop against the old canvas
        document.set_canvas(new_canvas);
        document.transform_selection(transform);

        if let Some(selection) = old.selection().filter(|_| hide) {
            let hiding = selection.transformed(transform);
            add_hiding_mask(document.layers_mut(), &hiding, new_canvas);
        }

        document.mark_dirty();
        let document = Arc::new(document);
        let name = self.edit_name(&old);
        let replace = Edit::replace(name, old, document.clone(), transform, true);
        let edit = match self.tool_crop_box {
            Some(crop_box) => Edit::Multi {
                name: name.to_string(),
                edits: vec![replace, Edit::CropBoxRestore { crop_box: Some(crop_box) }],
            },
            None => replace,
        };

        editor.view_mut().set_crop_box(None);
        editor.view_mut().ensure_positive_location();
        let document = editor.commit(edit, document);
        editor.messages().status(&format!(
            "Image cropped to {} x {} pixels.",
            new_canvas.width(),
            new_canvas.height()
        ));
        tracing::info!(?rect, "cropped");
        Pending::done(document)
    }
}

/// Crop the active document to its selection.
///
/// Rectangular selections are cropped directly. For other shapes the
/// editor's prompt decides, unless automation mode is on, in which case the
/// plain crop is used without asking. Without a selection nothing happens.
pub fn crop_to_selection(editor: &mut Editor) -> Result<Arc<Document>, EditError> {
    let document = editor.document().clone();
    let Some(selection) = document.selection().cloned() else {
        return Ok(document);
    };

    if editor.config().automation || selection.is_rectangular() {
        return rectangular_crop(editor, &selection, false);
    }

    match editor.crop_prompt().choose(&selection) {
        SelectionCropChoice::CropAndHide => rectangular_crop(editor, &selection, true),
        SelectionCropChoice::OnlyCrop => rectangular_crop(editor, &selection, false),
        SelectionCropChoice::OnlyHide => Ok(hide_outside(editor, &selection)),
        SelectionCropChoice::Cancel => {
            tracing::debug!("selection crop cancelled");
            Ok(document)
        }
    }
}

fn rectangular_crop(
    editor: &mut Editor,
    selection: &Selection,
    add_hiding_mask: bool,
) -> Result<Arc<Document>, EditError> {
    let crop = Crop::selection(selection.bounds(), true, true, add_hiding_mask);
    editor.apply(&crop)
}

/// Mask out everything outside the selection without cropping, and drop the
/// selection.
fn hide_outside(editor: &mut Editor, selection: &Selection) -> Arc<Document> {
    let old = editor.document().clone();
    let mut document = old.copy(false);
    let masked = add_hiding_mask(document.layers_mut(), selection, old.canvas());
    document.mark_dirty();

    let document = Arc::new(document);
    let edit = Edit::replace("Add Hiding Mask", old, document.clone(), Affine::IDENTITY, false);
    let document = editor.commit(edit, document);
    editor
        .messages()
        .status(&format!("Added a hiding mask to {masked} layers."));
    document
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_rect_clamps_without_growing() {
        let crop = Crop::new(Rect::new(15.0, 5.0, 35.0, 25.0), false, false, false);
        assert_eq!(crop.crop_rect(&Canvas::new(20, 10)), Some(IntRect::new(15, 5, 5, 5)));
    }

    #[test]
    fn test_crop_rect_keeps_overhang_when_growing() {
        let crop = Crop::new(Rect::new(15.0, 5.0, 35.0, 25.0), false, true, false);
        assert_eq!(crop.crop_rect(&Canvas::new(20, 10)), Some(IntRect::new(15, 5, 20, 20)));
    }

    #[test]
    fn test_crop_rect_outside_canvas_is_none() {
        let crop = Crop::new(Rect::new(30.0, 30.0, 40.0, 40.0), false, false, false);
        assert_eq!(crop.crop_rect(&Canvas::new(20, 10)), None);
    }

    #[test]
    fn test_crop_rect_zero_size_becomes_one_pixel() {
        let crop = Crop::new(Rect::new(3.0, 3.0, 3.2, 3.1), false, false, false);
        assert_eq!(crop.crop_rect(&Canvas::new(20, 10)), Some(IntRect::new(3, 3, 1, 1)));
    }

    #[test]
    fn test_edit_names() {
        let rect = Rect::new(0.0, 0.0, 5.0, 5.0);
        let canvas = Canvas::new(20, 10);
        let selected = Document::new("doc", canvas).with_selection(Selection::ellipse(rect));
        let unselected = Document::new("doc", canvas);

        let hiding = Crop::selection(rect, true, true, true);
        assert_eq!(hiding.edit_name(&selected), "Crop and Hide");
        assert_eq!(hiding.edit_name(&unselected), "Crop");
        assert_eq!(Crop::new(rect, true, true, true).edit_name(&selected), "Crop");
        assert_eq!(Crop::from_tool(rect, false, true).edit_name(&selected), "Crop");
    }
}
