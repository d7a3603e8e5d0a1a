//! Core types for the legalese client: document and concern records, the
//! session that tracks the registry and transcript, upload validation, and
//! client configuration. No I/O happens here.

pub mod config;
pub mod document;
pub mod session;
pub mod upload;

pub use config::ClientConfig;
pub use document::{ChatMessage, Concern, DocumentDescriptor, Role, Severity};
pub use session::{Session, SessionError};
pub use upload::{DroppedFile, UploadError, UploadRequest};
