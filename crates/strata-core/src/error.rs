//! Error types for composition edits.

use thiserror::Error;

/// Errors that can surface from a structural edit or from the history.
///
/// Policy rejections (empty crop, no-op resize, smart objects) are not
/// errors: the action hands back the unchanged document instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// A requested canvas size has a zero or oversized dimension.
    #[error("Invalid target size: {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    /// A single layer could not be resampled; the whole edit is aborted.
    #[error("Layer \"{layer}\" could not be resized: {reason}")]
    LayerResize { layer: String, reason: String },

    /// A raster buffer does not match its declared dimensions.
    #[error("Invalid raster buffer: {0}")]
    InvalidRaster(String),

    /// The worker pool could not be built or a job vanished before finishing.
    #[error("Worker pool error: {0}")]
    WorkerPool(String),

    /// Another edit replaced the active document while this one was running
    /// in the background; its result was discarded.
    #[error("The document changed while \"{edit}\" was running")]
    DocumentChanged { edit: String },

    /// `undo` was called with no edit to undo.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// `redo` was called with no edit to redo.
    #[error("Nothing to redo")]
    NothingToRedo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edit_error_display() {
        let err = EditError::InvalidSize {
            width: 0,
            height: 10,
        };
        assert_eq!(err.to_string(), "Invalid target size: 0x10");

        let err = EditError::LayerResize {
            layer: "layer 1".to_string(),
            reason: "too large".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Layer \"layer 1\" could not be resized: too large"
        );

        assert_eq!(EditError::NothingToUndo.to_string(), "Nothing to undo");

        let err = EditError::DocumentChanged {
            edit: "Resize".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "The document changed while \"Resize\" was running"
        );
    }
}
