//! API gateway client: one call per server endpoint, each normalised to
//! `Result<payload, ApiError>`.

mod backend;
mod envelope;
mod error;
mod http;
pub mod wire;

pub use backend::Backend;
pub use error::ApiError;
pub use http::ApiClient;
pub use wire::UploadReceipt;
