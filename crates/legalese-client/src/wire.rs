//! Request and response bodies for the server's JSON endpoints.

use legalese_core::{Concern, DocumentDescriptor};
use serde::{Deserialize, Serialize};

pub const UPLOAD_PATH: &str = "/api/upload";
pub const DOCUMENTS_PATH: &str = "/api/documents";
pub const ANALYZE_PATH: &str = "/api/analyze";
pub const CONCERNS_PATH: &str = "/api/concerns";
pub const COMPARE_PATH: &str = "/api/compare";
pub const EXPORT_PATH: &str = "/api/save-pdf";
pub const CHAT_PATH: &str = "/api/chat";
pub const CLEAR_PATH: &str = "/api/clear";
pub const SAMPLE_PATH: &str = "/static/sample-legal-document.txt";

/// File name the bundled sample is uploaded under.
pub const SAMPLE_FILE_NAME: &str = "sample-legal-document.txt";

// ── Requests ──

#[derive(Serialize)]
pub(crate) struct DocRequest<'a> {
    pub doc_name: &'a str,
}

#[derive(Serialize)]
pub(crate) struct CompareRequest<'a> {
    pub doc1: &'a str,
    pub doc2: &'a str,
}

/// `filename` serialises as `null` when absent; the server picks a name.
#[derive(Serialize)]
pub(crate) struct ExportRequest<'a> {
    pub filename: Option<&'a str>,
}

#[derive(Serialize)]
pub(crate) struct ChatRequest<'a> {
    pub message: &'a str,
    pub doc_name: Option<&'a str>,
}

// ── Responses ──

/// Extra fields returned by a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UploadReceipt {
    #[serde(default)]
    pub doc_name: Option<String>,
    #[serde(default)]
    pub length: Option<u64>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct DocumentsResponse {
    pub documents: Vec<DocumentDescriptor>,
}

#[derive(Deserialize)]
pub(crate) struct AnalysisResponse {
    pub analysis: String,
}

#[derive(Deserialize)]
pub(crate) struct ConcernsResponse {
    #[serde(default)]
    pub concerns: Vec<Concern>,
}

#[derive(Deserialize)]
pub(crate) struct ComparisonResponse {
    pub comparison: String,
}

#[derive(Deserialize)]
pub(crate) struct ExportResponse {
    pub filename: String,
}

#[derive(Deserialize)]
pub(crate) struct ChatResponse {
    pub response: String,
}

/// Append `.pdf` to a non-blank export name; blank names become `None`.
pub fn normalize_export_name(filename: Option<&str>) -> Option<String> {
    let name = filename.map(str::trim).filter(|n| !n.is_empty())?;
    if name.ends_with(".pdf") {
        Some(name.to_string())
    } else {
        Some(format!("{name}.pdf"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_request_sends_null_filename() {
        let json = serde_json::to_string(&ExportRequest { filename: None }).unwrap();
        assert_eq!(json, r#"{"filename":null}"#);
    }

    #[test]
    fn chat_request_shape() {
        let json = serde_json::to_string(&ChatRequest {
            message: "What is clause 4?",
            doc_name: Some("lease.pdf"),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"message":"What is clause 4?","doc_name":"lease.pdf"}"#
        );
    }

    #[test]
    fn compare_request_shape() {
        let json = serde_json::to_string(&CompareRequest {
            doc1: "A",
            doc2: "B",
        })
        .unwrap();
        assert_eq!(json, r#"{"doc1":"A","doc2":"B"}"#);
    }

    #[test]
    fn export_names_get_pdf_suffix() {
        assert_eq!(normalize_export_name(None), None);
        assert_eq!(normalize_export_name(Some("  ")), None);
        assert_eq!(
            normalize_export_name(Some("summary")).as_deref(),
            Some("summary.pdf")
        );
        assert_eq!(
            normalize_export_name(Some("summary.pdf")).as_deref(),
            Some("summary.pdf")
        );
    }
}
