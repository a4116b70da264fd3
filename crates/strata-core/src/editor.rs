//! The editing session: the active view, its history and the collaborators
//! every composition edit reports to.

use std::sync::Arc;

use crate::compactions::{CompAction, FixedChoice, SelectionCropChoice, SelectionCropPrompt};
use crate::config::EngineConfig;
use crate::document::Document;
use crate::error::EditError;
use crate::history::{Edit, History};
use crate::messages::{LogMessages, Messages};
use crate::view::View;

/// Owns the active document and is the only place it is swapped.
///
/// All methods run on the caller's thread; only the per-layer work of a
/// resize is handed to the worker pool.
pub struct Editor {
    view: View,
    history: History,
    messages: Box<dyn Messages>,
    crop_prompt: Box<dyn SelectionCropPrompt>,
    config: EngineConfig,
    pool: Arc<rayon::ThreadPool>,
}

impl Editor {
    pub fn new(document: Document, config: EngineConfig) -> Result<Self, EditError> {
        let pool = build_thread_pool(config.worker_threads)?;
        Ok(Self {
            view: View::new(Arc::new(document)),
            history: History::new(config.history_limit),
            messages: Box::new(LogMessages),
            crop_prompt: Box::new(FixedChoice(SelectionCropChoice::OnlyCrop)),
            config,
            pool: Arc::new(pool),
        })
    }

    pub fn with_messages(mut self, messages: impl Messages + 'static) -> Self {
        self.messages = Box::new(messages);
        self
    }

    pub fn with_crop_prompt(mut self, prompt: impl SelectionCropPrompt + 'static) -> Self {
        self.crop_prompt = Box::new(prompt);
        self
    }

    /// The active document.
    pub fn document(&self) -> &Arc<Document> {
        self.view.document()
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut View {
        &mut self.view
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn pool(&self) -> &Arc<rayon::ThreadPool> {
        &self.pool
    }

    pub fn messages(&mut self) -> &mut dyn Messages {
        self.messages.as_mut()
    }

    pub(crate) fn crop_prompt(&self) -> &dyn SelectionCropPrompt {
        self.crop_prompt.as_ref()
    }

    /// Run an edit to completion, waiting for any background work.
    pub fn apply(&mut self, action: &dyn CompAction) -> Result<Arc<Document>, EditError> {
        action.process(self).wait(self)
    }

    /// Record `edit` and show `document`.
    pub(crate) fn commit(&mut self, edit: Edit, document: Arc<Document>) -> Arc<Document> {
        self.history.push(edit);
        self.view.replace_document(document.clone());
        self.view.refresh_thumbnails();
        document
    }

    pub fn undo(&mut self) -> Result<String, EditError> {
        let name = self.history.undo(&mut self.view)?;
        tracing::debug!(edit = %name, "undo");
        Ok(name)
    }

    pub fn redo(&mut self) -> Result<String, EditError> {
        let name = self.history.redo(&mut self.view)?;
        tracing::debug!(edit = %name, "redo");
        Ok(name)
    }
}

fn build_thread_pool(threads: usize) -> Result<rayon::ThreadPool, EditError> {
    let mut builder = rayon::ThreadPoolBuilder::new().thread_name(|i| format!("strata-worker-{i}"));
    if threads > 0 {
        builder = builder.num_threads(threads);
    }
    builder
        .build()
        .map_err(|e| EditError::WorkerPool(format!("failed to build rayon thread pool: {e}")))
}
