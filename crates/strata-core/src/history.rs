//! Undo/redo for composition edits.
//!
//! Every structural edit keeps both the document it replaced and the one it
//! produced, so undo and redo are a swap of the active document and never
//! recompute pixels.

use std::collections::VecDeque;
use std::sync::Arc;

use kurbo::{Affine, Rect};

use crate::document::Document;
use crate::error::EditError;
use crate::view::View;

/// A document swap recorded by a composition edit.
#[derive(Debug, Clone)]
pub struct CompositionReplaced {
    pub name: String,
    pub old: Arc<Document>,
    pub new: Arc<Document>,
    /// Maps image space before the edit to image space after it.
    pub transform: Affine,
    pub canvas_size_changed: bool,
}

#[derive(Debug, Clone)]
pub enum Edit {
    Replace(CompositionReplaced),
    /// Brings back the crop tool's box when a tool crop is undone.
    CropBoxRestore { crop_box: Option<Rect> },
    /// Several edits undone and redone as one.
    Multi { name: String, edits: Vec<Edit> },
}

impl Edit {
    pub fn replace(
        name: impl Into<String>,
        old: Arc<Document>,
        new: Arc<Document>,
        transform: Affine,
        canvas_size_changed: bool,
    ) -> Self {
        Edit::Replace(CompositionReplaced {
            name: name.into(),
            old,
            new,
            transform,
            canvas_size_changed,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Edit::Replace(edit) => &edit.name,
            Edit::CropBoxRestore { .. } => "Restore Crop Box",
            Edit::Multi { name, .. } => name,
        }
    }

    /// The document swap inside this edit, if any.
    pub fn replacement(&self) -> Option<&CompositionReplaced> {
        match self {
            Edit::Replace(edit) => Some(edit),
            Edit::CropBoxRestore { .. } => None,
            Edit::Multi { edits, .. } => edits.iter().find_map(Edit::replacement),
        }
    }

    pub fn undo(&self, view: &mut View) {
        match self {
            Edit::Replace(edit) => {
                view.replace_document(edit.old.clone());
                view.refresh_thumbnails();
            }
            Edit::CropBoxRestore { crop_box } => view.set_crop_box(*crop_box),
            Edit::Multi { edits, .. } => {
                for edit in edits.iter().rev() {
                    edit.undo(view);
                }
            }
        }
    }

    pub fn redo(&self, view: &mut View) {
        match self {
            Edit::Replace(edit) => {
                view.replace_document(edit.new.clone());
                view.refresh_thumbnails();
            }
            Edit::CropBoxRestore { .. } => view.set_crop_box(None),
            Edit::Multi { edits, .. } => {
                for edit in edits {
                    edit.redo(view);
                }
            }
        }
    }
}

/// Undo and redo stacks with a size limit.
#[derive(Debug)]
pub struct History {
    undo_stack: VecDeque<Edit>,
    redo_stack: VecDeque<Edit>,
    max_history_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(50)
    }
}

impl History {
    pub fn new(max_history_size: usize) -> Self {
        Self {
            undo_stack: VecDeque::new(),
            redo_stack: VecDeque::new(),
            max_history_size: max_history_size.max(1),
        }
    }

    pub fn push(&mut self, edit: Edit) {
        // A new edit invalidates everything that was undone
        self.redo_stack.clear();
        tracing::debug!(edit = edit.name(), "history push");
        self.undo_stack.push_back(edit);

        while self.undo_stack.len() > self.max_history_size {
            if let Some(evicted) = self.undo_stack.pop_front() {
                tracing::trace!(edit = evicted.name(), "history evict");
            }
        }
    }

    pub fn undo(&mut self, view: &mut View) -> Result<String, EditError> {
        let edit = self.undo_stack.pop_back().ok_or(EditError::NothingToUndo)?;
        edit.undo(view);
        let name = edit.name().to_string();
        self.redo_stack.push_back(edit);
        Ok(name)
    }

    pub fn redo(&mut self, view: &mut View) -> Result<String, EditError> {
        let edit = self.redo_stack.pop_back().ok_or(EditError::NothingToRedo)?;
        edit.redo(view);
        let name = edit.name().to_string();
        self.undo_stack.push_back(edit);
        Ok(name)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.back().map(Edit::name)
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.back().map(Edit::name)
    }

    /// The most recent edit that can be undone.
    pub fn last_edit(&self) -> Option<&Edit> {
        self.undo_stack.back()
    }

    /// Get all undo descriptions (most recent first)
    pub fn undo_history(&self) -> Vec<String> {
        self.undo_stack.iter().rev().map(|e| e.name().to_string()).collect()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
