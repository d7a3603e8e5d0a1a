//! Transient notifications.

use std::time::{Duration, Instant};

use legalese_core::config::DEFAULT_TOAST_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

impl ToastKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Info => "info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }
}

/// Toasts currently on screen, each dismissed after a fixed duration.
#[derive(Debug, Clone)]
pub struct ToastTray {
    duration: Duration,
    entries: Vec<(Toast, Instant)>,
}

impl Default for ToastTray {
    fn default() -> Self {
        Self::new(DEFAULT_TOAST_DURATION)
    }
}

impl ToastTray {
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, toast: Toast, now: Instant) {
        self.prune(now);
        self.entries.push((toast, now));
    }

    /// Toasts still visible at `now`, oldest first.
    pub fn visible(&self, now: Instant) -> impl Iterator<Item = &Toast> {
        self.entries
            .iter()
            .filter(move |(_, shown)| now.saturating_duration_since(*shown) < self.duration)
            .map(|(toast, _)| toast)
    }

    /// Drop expired toasts.
    pub fn prune(&mut self, now: Instant) {
        let duration = self.duration;
        self.entries
            .retain(|(_, shown)| now.saturating_duration_since(*shown) < duration);
    }

    /// Every toast pushed and not yet pruned, regardless of expiry.
    pub fn history(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|(toast, _)| toast)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_duration() {
        let mut tray = ToastTray::new(Duration::from_secs(3));
        let t0 = Instant::now();
        tray.push(Toast::success("Uploaded"), t0);
        tray.push(Toast::error("Failed"), t0 + Duration::from_secs(2));

        let at_2500ms: Vec<&str> = tray
            .visible(t0 + Duration::from_millis(2500))
            .map(|t| t.message.as_str())
            .collect();
        assert_eq!(at_2500ms, ["Uploaded", "Failed"]);

        let at_3s: Vec<&str> = tray
            .visible(t0 + Duration::from_secs(3))
            .map(|t| t.message.as_str())
            .collect();
        assert_eq!(at_3s, ["Failed"]);

        assert_eq!(tray.visible(t0 + Duration::from_secs(5)).count(), 0);
    }

    #[test]
    fn push_prunes_expired_entries() {
        let mut tray = ToastTray::default();
        let t0 = Instant::now();
        tray.push(Toast::info("old"), t0);
        tray.push(Toast::info("new"), t0 + Duration::from_secs(10));
        assert_eq!(tray.history().count(), 1);
    }

    #[test]
    fn kind_names() {
        assert_eq!(ToastKind::Success.as_str(), "success");
        assert_eq!(Toast::error("x").kind, ToastKind::Error);
    }
}
