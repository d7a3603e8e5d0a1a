//! In-memory backend for controller tests.

use std::sync::Mutex;

use async_trait::async_trait;
use legalese_client::wire::normalize_export_name;
use legalese_client::{ApiError, Backend, UploadReceipt};
use legalese_core::{Concern, DocumentDescriptor, UploadRequest};

use crate::controller::Controller;
use crate::view::Screen;

pub(crate) fn doc(name: &str) -> DocumentDescriptor {
    DocumentDescriptor::new(name, "2024-05-01 12:00:00", 1000)
}

pub(crate) fn concern(severity: &str, clause: &str) -> Concern {
    serde_json::from_value(serde_json::json!({
        "severity": severity,
        "clause": clause,
        "concern": "Unclear obligation",
        "recommendation": "Ask for clarification",
    }))
    .unwrap()
}

pub(crate) fn controller_with(backend: FakeBackend) -> Controller<FakeBackend, Screen> {
    Controller::new(backend, Screen::default())
}

#[derive(Default)]
struct FakeState {
    documents: Vec<DocumentDescriptor>,
    concerns: Vec<Concern>,
    comparison: Option<String>,
    analyzed: bool,
    fail: Option<String>,
    calls: Vec<&'static str>,
}

/// Mimics the server's behaviour closely enough for controller tests.
#[derive(Default)]
pub(crate) struct FakeBackend {
    state: Mutex<FakeState>,
}

impl FakeBackend {
    pub(crate) fn with_documents(documents: Vec<DocumentDescriptor>) -> Self {
        let backend = Self::default();
        backend.state.lock().unwrap().documents = documents;
        backend
    }

    /// Make every subsequent call fail with `success: false` and `message`.
    pub(crate) fn fail_with(&self, message: &str) {
        self.state.lock().unwrap().fail = Some(message.to_string());
    }

    pub(crate) fn set_concerns(&self, concerns: Vec<Concern>) {
        self.state.lock().unwrap().concerns = concerns;
    }

    pub(crate) fn set_comparison(&self, text: &str) {
        self.state.lock().unwrap().comparison = Some(text.to_string());
    }

    pub(crate) fn calls(&self) -> Vec<&'static str> {
        self.state.lock().unwrap().calls.clone()
    }

    fn enter(&self, call: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if let Some(msg) = state.fail.clone() {
            return Err(ApiError::Rejected(msg));
        }
        Ok(state)
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, ApiError> {
        let mut state = self.enter("upload")?;
        state.documents.push(DocumentDescriptor::new(
            request.doc_name(),
            "2024-05-01 12:00:00",
            request.bytes().len() as u64,
        ));
        Ok(UploadReceipt {
            doc_name: Some(request.doc_name().to_string()),
            length: Some(request.bytes().len() as u64),
            message: Some("Document loaded successfully".into()),
        })
    }

    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, ApiError> {
        Ok(self.enter("list_documents")?.documents.clone())
    }

    async fn analyze(&self, doc_name: &str) -> Result<String, ApiError> {
        let mut state = self.enter("analyze")?;
        if !state.documents.iter().any(|d| d.name == doc_name) {
            return Err(ApiError::Rejected("Document not found".into()));
        }
        state.analyzed = true;
        Ok(format!("Analysis of {doc_name}"))
    }

    async fn concerns(&self, _doc_name: &str) -> Result<Vec<Concern>, ApiError> {
        let mut state = self.enter("concerns")?;
        state.analyzed = true;
        Ok(state.concerns.clone())
    }

    async fn compare(&self, doc1: &str, doc2: &str) -> Result<String, ApiError> {
        let mut state = self.enter("compare")?;
        state.analyzed = true;
        Ok(state
            .comparison
            .clone()
            .unwrap_or_else(|| format!("{doc1} differs from {doc2}")))
    }

    async fn export(&self, filename: Option<&str>) -> Result<String, ApiError> {
        let state = self.enter("export")?;
        if !state.analyzed {
            return Err(ApiError::Rejected("No analysis to save".into()));
        }
        Ok(normalize_export_name(filename).unwrap_or_else(|| "legal_analysis.pdf".into()))
    }

    async fn download(&self, _filename: &str) -> Result<Vec<u8>, ApiError> {
        let _state = self.enter("download")?;
        Ok(b"%PDF-1.4 test".to_vec())
    }

    async fn chat(&self, message: &str, doc_name: Option<&str>) -> Result<String, ApiError> {
        let _state = self.enter("chat")?;
        Ok(format!(
            "Reply to: {message} ({})",
            doc_name.unwrap_or("no document")
        ))
    }

    async fn clear_chat(&self) -> Result<(), ApiError> {
        let _state = self.enter("clear")?;
        Ok(())
    }

    async fn sample_document(&self) -> Result<Vec<u8>, ApiError> {
        let _state = self.enter("sample")?;
        Ok(b"SAMPLE RESIDENTIAL LEASE AGREEMENT".to_vec())
    }
}
