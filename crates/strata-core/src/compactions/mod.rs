//! Composition edits: whole-canvas structural changes.
//!
//! Every edit follows the same contract: it reads the active document,
//! builds a transformed copy, records a history edit and swaps the copy in.
//! The document that was active before is never modified and becomes the
//! undo baseline. An edit that changes nothing hands back the active
//! document itself and records no history.
//!
//! Most edits finish synchronously. Resize does its per-layer work on the
//! editor's worker pool and finishes on the caller's thread in
//! [`Pending::wait`].

mod crop;
mod enlarge;
mod flip;
mod resize;
mod rotate;
mod simple;


pub use crop::{crop_to_selection, Crop, FixedChoice, SelectionCropChoice, SelectionCropPrompt};
pub use enlarge::EnlargeCanvas;
pub use flip::Flip;
pub use resize::Resize;
pub use rotate::Rotate;
pub use simple::{LayerContext, SimpleCompAction};

use std::fmt;
use std::sync::mpsc::Receiver;
use std::sync::Arc;

use crate::document::Document;
use crate::editor::Editor;
use crate::error::EditError;

/// A structural edit of the active document.
pub trait CompAction {
    fn process(&self, editor: &mut Editor) -> Pending;
}

type Commit =
    Box<dyn FnOnce(&mut Editor, Document) -> Result<Arc<Document>, EditError> + Send>;

/// The outcome of [`CompAction::process`], possibly still being computed.
pub enum Pending {
    Ready(Result<Arc<Document>, EditError>),
    /// Background work that produces the new document, and the step that
    /// installs it once it arrives.
    InFlight {
        receiver: Receiver<Result<Document, EditError>>,
        commit: Commit,
    },
}

impl Pending {
    pub fn done(document: Arc<Document>) -> Self {
        Pending::Ready(Ok(document))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Pending::Ready(_))
    }

    /// Block until the edit is finished and return the active document.
    ///
    /// Failures of background work are reported through the editor's
    /// messages; the document that was active stays active. So does a
    /// document installed by another edit while the work was running.
    pub fn wait(self, editor: &mut Editor) -> Result<Arc<Document>, EditError> {
        match self {
            Pending::Ready(result) => result,
            Pending::InFlight { receiver, commit } => {
                let result = receiver
                    .recv()
                    .map_err(|_| EditError::WorkerPool("worker dropped the result".into()))
                    .and_then(|result| result)
                    .and_then(|document| commit(editor, document));
                match result {
                    Ok(document) => Ok(document),
                    Err(error) => {
                        tracing::error!(%error, "composition edit failed");
                        editor.messages().error(&error);
                        Err(error)
                    }
                }
            }
        }
    }
}

impl fmt::Debug for Pending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pending::Ready(result) => f.debug_tuple("Ready").field(result).finish(),
            Pending::InFlight { .. } => f.write_str("InFlight"),
        }
    }
}
