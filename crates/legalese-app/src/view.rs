//! The display surface controllers report to.

use std::time::{Duration, Instant};

use crate::html;
use crate::render::{ChatEntryView, DocumentListView, ResultView};
use crate::toast::{Toast, ToastTray};

/// Sink for everything a controller shows.
///
/// Implementations decide how to present; they never call back into the
/// controller.
pub trait View: Send {
    /// Show or hide the busy indicator. A plain flag, not a counter.
    fn set_busy(&mut self, busy: bool);

    fn toast(&mut self, toast: Toast);

    fn show_documents(&mut self, documents: DocumentListView);

    /// Replace the results panel.
    fn show_result(&mut self, result: ResultView);

    /// Append one entry below the existing transcript.
    fn append_chat(&mut self, entry: ChatEntryView);

    fn clear_chat(&mut self);

    /// Reset the upload display-name field after a successful upload.
    fn clear_upload_name(&mut self) {}

    fn clear_chat_input(&mut self) {}

    /// An export finished and `filename` can be downloaded.
    fn export_ready(&mut self, _filename: &str) {}
}

/// In-memory page state: the view-model of everything on screen.
///
/// Renders to an HTML fragment for snapshotting.
#[derive(Debug, Clone, Default)]
pub struct Screen {
    pub busy: bool,
    pub toasts: ToastTray,
    pub documents: Option<DocumentListView>,
    pub result: Option<ResultView>,
    pub chat: Vec<ChatEntryView>,
    /// Index of the entry the transcript is scrolled to.
    pub chat_scroll: Option<usize>,
    pub upload_name: String,
    pub chat_input: String,
    pub last_export: Option<String>,
}

impl Screen {
    pub fn new(toast_duration: Duration) -> Self {
        Self {
            toasts: ToastTray::new(toast_duration),
            ..Self::default()
        }
    }

    pub fn visible_toasts(&self, now: Instant) -> Vec<&Toast> {
        self.toasts.visible(now).collect()
    }

    pub fn render_html(&self, now: Instant) -> String {
        let mut out = String::new();
        if self.busy {
            out.push_str(r#"<div class="loading-overlay active"><div class="spinner"></div></div>"#);
        }
        out.push_str(r#"<section id="documents">"#);
        if let Some(docs) = &self.documents {
            out.push_str(&html::render_documents(docs));
        }
        out.push_str("</section>");
        out.push_str(r#"<section id="results">"#);
        if let Some(result) = &self.result {
            out.push_str(&html::render_result(result));
        }
        out.push_str("</section>");
        out.push_str(r#"<section id="chat">"#);
        for entry in &self.chat {
            out.push_str(&html::render_chat_entry(entry));
        }
        out.push_str("</section>");
        for toast in self.visible_toasts(now) {
            out.push_str(&html::render_toast(toast));
        }
        out
    }
}

impl View for Screen {
    fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    fn toast(&mut self, toast: Toast) {
        self.toasts.push(toast, Instant::now());
    }

    fn show_documents(&mut self, documents: DocumentListView) {
        self.documents = Some(documents);
    }

    fn show_result(&mut self, result: ResultView) {
        self.result = Some(result);
    }

    fn append_chat(&mut self, entry: ChatEntryView) {
        self.chat.push(entry);
        self.chat_scroll = Some(self.chat.len() - 1);
    }

    fn clear_chat(&mut self) {
        self.chat.clear();
        self.chat_scroll = None;
    }

    fn clear_upload_name(&mut self) {
        self.upload_name.clear();
    }

    fn clear_chat_input(&mut self) {
        self.chat_input.clear();
    }

    fn export_ready(&mut self, filename: &str) {
        self.last_export = Some(filename.to_string());
    }
}
