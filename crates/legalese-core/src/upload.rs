//! Upload request construction.
//!
//! A request carries the file bytes, the file's own name, and the display
//! name the server registers the document under. Blank display names fall
//! back to the file name.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extensions the server can extract text from.
pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "docx", "txt"];

/// Server-side request body limit (16 MiB).
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

#[derive(Error, Debug)]
pub enum UploadError {
    #[error("no file selected")]
    MissingFileName,
    #[error("invalid file type: {0}. Use PDF, DOCX, or TXT")]
    UnsupportedType(String),
    #[error("file too large: {size} bytes (limit {limit})")]
    TooLarge { size: usize, limit: usize },
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// A file handed over by a drag-and-drop gesture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct UploadRequest {
    file_name: String,
    doc_name: String,
    bytes: Vec<u8>,
}

impl UploadRequest {
    /// Validate and build a request.
    ///
    /// `file_name` may be a path; only its last component is kept.
    pub fn new(
        file_name: &str,
        bytes: Vec<u8>,
        display_name: Option<&str>,
    ) -> Result<Self, UploadError> {
        let file_name = Path::new(file_name.trim())
            .file_name()
            .and_then(|n| n.to_str())
            .map(str::to_string)
            .ok_or(UploadError::MissingFileName)?;

        if !has_allowed_extension(&file_name) {
            return Err(UploadError::UnsupportedType(file_name));
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                size: bytes.len(),
                limit: MAX_UPLOAD_BYTES,
            });
        }

        let doc_name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => file_name.clone(),
        };

        Ok(Self {
            file_name,
            doc_name,
            bytes,
        })
    }

    /// Build a request from a drop gesture.
    ///
    /// Returns `None` when nothing was dropped. Only the first file is used.
    pub fn from_drop(
        files: Vec<DroppedFile>,
        display_name: Option<&str>,
    ) -> Option<Result<Self, UploadError>> {
        let file = files.into_iter().next()?;
        Some(Self::new(&file.name, file.bytes, display_name))
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn doc_name(&self) -> &str {
        &self.doc_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

/// Case-insensitive check against [`ALLOWED_EXTENSIONS`].
pub fn has_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .is_some_and(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}
