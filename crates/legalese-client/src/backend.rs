use async_trait::async_trait;
use legalese_core::{Concern, DocumentDescriptor, UploadRequest};

use crate::error::ApiError;
use crate::wire::UploadReceipt;

/// The server's endpoint set, one method per endpoint.
///
/// [`ApiClient`](crate::ApiClient) talks HTTP; controllers only see this
/// trait so they can be driven by an in-memory backend.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `POST /api/upload` (multipart `file` + `doc_name`).
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, ApiError>;

    /// `GET /api/documents`.
    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, ApiError>;

    /// `POST /api/analyze`: plain-language analysis text.
    async fn analyze(&self, doc_name: &str) -> Result<String, ApiError>;

    /// `POST /api/concerns`.
    async fn concerns(&self, doc_name: &str) -> Result<Vec<Concern>, ApiError>;

    /// `POST /api/compare`.
    async fn compare(&self, doc1: &str, doc2: &str) -> Result<String, ApiError>;

    /// `POST /api/save-pdf`: returns the server-side file name.
    async fn export(&self, filename: Option<&str>) -> Result<String, ApiError>;

    /// `GET /api/download/{filename}`.
    async fn download(&self, filename: &str) -> Result<Vec<u8>, ApiError>;

    /// `POST /api/chat`: the assistant's reply.
    async fn chat(&self, message: &str, doc_name: Option<&str>) -> Result<String, ApiError>;

    /// `POST /api/clear`: reset the server-side conversation.
    async fn clear_chat(&self) -> Result<(), ApiError>;

    /// `GET /static/sample-legal-document.txt`.
    async fn sample_document(&self) -> Result<Vec<u8>, ApiError>;
}
