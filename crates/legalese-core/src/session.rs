//! Client-side session: the document registry snapshot, the current
//! document, and the chat transcript.
//!
//! The current document, when set, always names an entry of the last
//! registry snapshot.

use thiserror::Error;
use tracing::debug;

use crate::document::{ChatMessage, DocumentDescriptor};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("document not found: {0}")]
    UnknownDocument(String),
}

#[derive(Debug, Default, Clone)]
pub struct Session {
    documents: Vec<DocumentDescriptor>,
    current: Option<String>,
    transcript: Vec<ChatMessage>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn documents(&self) -> &[DocumentDescriptor] {
        &self.documents
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.iter().any(|d| d.name == name)
    }

    /// Name of the current document.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn current_document(&self) -> Option<&DocumentDescriptor> {
        let name = self.current.as_deref()?;
        self.documents.iter().find(|d| d.name == name)
    }

    /// Replace the registry with a fresh snapshot.
    ///
    /// A selection that survives in the new list is kept; otherwise the
    /// first entry becomes current (or nothing, for an empty list).
    pub fn replace_documents(&mut self, documents: Vec<DocumentDescriptor>) {
        self.documents = documents;
        let keep = self
            .current
            .as_deref()
            .is_some_and(|name| self.contains(name));
        if !keep {
            self.current = self.documents.first().map(|d| d.name.clone());
            debug!(current = ?self.current, "selection reset after refresh");
        }
    }

    /// Make `name` the current document. Exact match only.
    pub fn select(&mut self, name: &str) -> Result<(), SessionError> {
        if !self.contains(name) {
            return Err(SessionError::UnknownDocument(name.to_string()));
        }
        self.current = Some(name.to_string());
        Ok(())
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn push_message(&mut self, message: ChatMessage) {
        self.transcript.push(message);
    }

    pub fn clear_transcript(&mut self) {
        self.transcript.clear();
    }
}
