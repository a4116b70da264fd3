//! Strata Core - composition transform engine
//!
//! This crate performs the structural, whole-canvas edits of the Strata
//! layered image editor: crop, resize, rotate, flip and canvas enlargement.
//! Each edit keeps the selection, the guides, the layer offsets and the
//! canvas size consistent with each other, and records an undo step that is
//! a plain swap of document snapshots.
//!
//! ```ignore
//! let mut editor = Editor::new(document, EngineConfig::default())?;
//! editor.apply(&Rotate::new(QuadrantAngle::Deg90))?;
//! editor.apply(&Resize::new(800, 600, true))?;
//! editor.undo()?;
//! ```

pub mod compactions;
pub mod config;
pub mod document;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod guides;
pub mod history;
pub mod layer;
pub mod mask;
pub mod messages;
pub mod outsets;
pub mod raster;
pub mod selection;
pub mod transform;
pub mod view;

#[cfg(test)]
mod test_support;

pub use compactions::{
    crop_to_selection, CompAction, Crop, EnlargeCanvas, Flip, Pending, Resize, Rotate,
    SelectionCropChoice, SelectionCropPrompt, SimpleCompAction,
};
pub use config::EngineConfig;
pub use document::Document;
pub use editor::Editor;
pub use error::EditError;
pub use geometry::{Canvas, IntRect};
pub use guides::Guides;
pub use history::{Edit, History};
pub use layer::{Layer, LayerId, LayerKind};
pub use mask::LayerMask;
pub use messages::{LogMessages, Messages, RecordingMessages};
pub use outsets::Outsets;
pub use raster::Raster;
pub use selection::Selection;
pub use transform::{FilterType, FlipDirection, QuadrantAngle};
pub use view::View;
