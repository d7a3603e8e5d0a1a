use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid URL: {0}")]
    Url(String),
    /// The server answered but reported `success: false`.
    #[error("{0}")]
    Rejected(String),
}

impl ApiError {
    /// Text suitable for a toast or an inline chat error.
    pub fn user_message(&self) -> String {
        match self {
            Self::Rejected(msg) => msg.clone(),
            Self::Http(e) if e.is_connect() => "Could not reach the server".to_string(),
            Self::Http(e) if e.is_timeout() => "The request timed out".to_string(),
            other => format!("Error: {other}"),
        }
    }
}
