//! User-facing notifications emitted by edits.

use std::sync::{Arc, Mutex};

use crate::error::EditError;

/// Where status lines, warnings and errors go.
pub trait Messages: Send {
    fn status(&mut self, message: &str);
    fn warning(&mut self, title: &str, message: &str);
    fn error(&mut self, error: &EditError);
}

/// Forwards every message to `tracing`.
#[derive(Debug, Default)]
pub struct LogMessages;

impl Messages for LogMessages {
    fn status(&mut self, message: &str) {
        tracing::info!(target: "strata::status", "{message}");
    }

    fn warning(&mut self, title: &str, message: &str) {
        tracing::warn!(target: "strata::status", title, "{message}");
    }

    fn error(&mut self, error: &EditError) {
        tracing::error!(target: "strata::status", %error, "edit failed");
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    Status(String),
    Warning { title: String, message: String },
    Error(EditError),
}

/// Keeps every message in memory. Clones share the same log, so a test can
/// keep one handle and give the other to an editor.
#[derive(Debug, Clone, Default)]
pub struct RecordingMessages {
    log: Arc<Mutex<Vec<Message>>>,
}

impl RecordingMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        match self.log.lock() {
            Ok(log) => log.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The most recent status line.
    pub fn last_status(&self) -> Option<String> {
        self.messages().into_iter().rev().find_map(|m| match m {
            Message::Status(s) => Some(s),
            _ => None,
        })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Warning { title, .. } => Some(title),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<EditError> {
        self.messages()
            .into_iter()
            .filter_map(|m| match m {
                Message::Error(e) => Some(e),
                _ => None,
            })
            .collect()
    }

    fn push(&self, message: Message) {
        match self.log.lock() {
            Ok(mut log) => log.push(message),
            Err(poisoned) => poisoned.into_inner().push(message),
        }
    }
}

impl Messages for RecordingMessages {
    fn status(&mut self, message: &str) {
        self.push(Message::Status(message.to_string()));
    }

    fn warning(&mut self, title: &str, message: &str) {
        self.push(Message::Warning {
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    fn error(&mut self, error: &EditError) {
        self.push(Message::Error(error.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_shares_log_between_clones() {
        let recorder = RecordingMessages::new();
        let mut handle = recorder.clone();
        handle.status("Image cropped to 5 x 5 pixels.");
        handle.warning("Feature Not Supported", "not for smart objects");
        handle.error(&EditError::NothingToUndo);

        assert_eq!(recorder.messages().len(), 3);
        assert_eq!(recorder.last_status().as_deref(), Some("Image cropped to 5 x 5 pixels."));
        assert_eq!(recorder.warnings(), ["Feature Not Supported"]);
        assert_eq!(recorder.errors(), [EditError::NothingToUndo]);
    }

    #[test]
    fn test_log_messages_do_not_panic_without_subscriber() {
        let mut messages = LogMessages;
        messages.status("done");
        messages.warning("title", "body");
        messages.error(&EditError::NothingToRedo);
    }
}
