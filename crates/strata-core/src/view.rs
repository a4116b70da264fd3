//! The view showing the active document.

use std::sync::Arc;

use kurbo::Rect;

use crate::document::Document;

/// Binds the active document to its on-screen state.
///
/// The document is swapped as a whole; the view never edits it.
#[derive(Debug, Clone)]
pub struct View {
    document: Arc<Document>,
    location: (i32, i32),
    crop_box: Option<Rect>,
    thumbnail_generation: u64,
    selection_actions_enabled: bool,
}

impl View {
    pub fn new(document: Arc<Document>) -> Self {
        let selection_actions_enabled = document.has_selection();
        Self {
            document,
            location: (0, 0),
            crop_box: None,
            thumbnail_generation: 0,
            selection_actions_enabled,
        }
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// Show `document` instead of the current one, returning the old one.
    pub fn replace_document(&mut self, document: Arc<Document>) -> Arc<Document> {
        self.selection_actions_enabled = document.has_selection();
        std::mem::replace(&mut self.document, document)
    }

    /// Position of the view's frame in its container.
    pub fn location(&self) -> (i32, i32) {
        self.location
    }

    pub fn set_location(&mut self, x: i32, y: i32) {
        self.location = (x, y);
    }

    /// Move the frame back into reach after an edit that may have left it at
    /// negative coordinates.
    pub fn ensure_positive_location(&mut self) {
        let (x, y) = self.location;
        self.location = (x.max(0), y.max(0));
    }

    /// The rectangle of an interactive crop in progress, in image space.
    pub fn crop_box(&self) -> Option<Rect> {
        self.crop_box
    }

    pub fn set_crop_box(&mut self, crop_box: Option<Rect>) {
        self.crop_box = crop_box;
    }

    /// Incremented whenever layer thumbnails must be redrawn.
    pub fn thumbnail_generation(&self) -> u64 {
        self.thumbnail_generation
    }

    pub fn refresh_thumbnails(&mut self) {
        self.thumbnail_generation += 1;
    }

    /// Whether selection-dependent actions (crop to selection, deselect)
    /// are available.
    pub fn selection_actions_enabled(&self) -> bool {
        self.selection_actions_enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Canvas;
    use crate::selection::Selection;

    #[test]
    fn test_replace_returns_previous() {
        let first = Arc::new(Document::new("first", Canvas::new(4, 4)));
        let second = Arc::new(
            Document::new("second", Canvas::new(4, 4))
                .with_selection(Selection::rectangle(Rect::new(0.0, 0.0, 2.0, 2.0))),
        );
        let mut view = View::new(first.clone());
        assert!(!view.selection_actions_enabled());

        let old = view.replace_document(second.clone());
        assert!(Arc::ptr_eq(&old, &first));
        assert!(Arc::ptr_eq(view.document(), &second));
        assert!(view.selection_actions_enabled());
    }

    #[test]
    fn test_ensure_positive_location() {
        let mut view = View::new(Arc::new(Document::new("doc", Canvas::new(4, 4))));
        view.set_location(-30, 12);
        view.ensure_positive_location();
        assert_eq!(view.location(), (0, 12));
    }
}
