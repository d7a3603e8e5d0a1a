//! Client configuration shared by the gateway client and the presenters.

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// How long a toast stays visible.
pub const DEFAULT_TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Server origin without a trailing slash, e.g. `http://localhost:5000`.
    pub base_url: String,
    pub toast_duration: Duration,
    /// Per-request timeout. `None` waits indefinitely, which leaves the busy
    /// indicator up for as long as a hung request lasts.
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            toast_duration: DEFAULT_TOAST_DURATION,
            request_timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Absolute URL for a server path such as `/api/documents`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
