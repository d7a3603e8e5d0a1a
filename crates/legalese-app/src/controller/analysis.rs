use std::path::{Path, PathBuf};

use legalese_client::Backend;
use tracing::{info, warn};

use super::Controller;
use crate::render::{analysis_view, comparison_view, concerns_view};
use crate::toast::Toast;
use crate::view::View;

const NO_DOCUMENT: &str = "Please select a document first";

impl<B: Backend, V: View> Controller<B, V> {
    fn require_current(&mut self) -> Option<String> {
        let current = self.session.current_document().map(|d| d.name.clone());
        if current.is_none() {
            self.view.toast(Toast::error(NO_DOCUMENT));
        }
        current
    }

    /// Plain-language analysis of the current document.
    pub async fn analyze(&mut self) {
        let Some(doc) = self.require_current() else {
            return;
        };
        self.view.set_busy(true);
        let result = self.backend.analyze(&doc).await;
        self.view.set_busy(false);

        match result {
            Ok(text) => {
                info!(doc_name = %doc, chars = text.len(), "analysis rendered");
                self.view.show_result(analysis_view(&doc, &text));
                self.view.toast(Toast::success("Analysis complete"));
            }
            Err(e) => {
                warn!(error = %e, doc_name = %doc, "analysis failed");
                self.view.toast(Toast::error(e.user_message()));
            }
        }
    }

    /// Concerning clauses of the current document.
    pub async fn concerns(&mut self) {
        let Some(doc) = self.require_current() else {
            return;
        };
        self.view.set_busy(true);
        let result = self.backend.concerns(&doc).await;
        self.view.set_busy(false);

        match result {
            Ok(concerns) => {
                info!(doc_name = %doc, count = concerns.len(), "concerns rendered");
                self.view.show_result(concerns_view(&concerns));
            }
            Err(e) => {
                warn!(error = %e, doc_name = %doc, "concerns request failed");
                self.view.toast(Toast::error(e.user_message()));
            }
        }
    }

    pub async fn compare(&mut self, first: &str, second: &str) {
        let (first, second) = (first.trim(), second.trim());
        if first.is_empty() || second.is_empty() {
            self.view
                .toast(Toast::error("Please select two documents to compare"));
            return;
        }
        if first == second {
            self.view
                .toast(Toast::error("Please select two different documents"));
            return;
        }

        self.view.set_busy(true);
        let result = self.backend.compare(first, second).await;
        self.view.set_busy(false);

        match result {
            Ok(text) => {
                info!(doc1 = first, doc2 = second, "comparison rendered");
                self.view.show_result(comparison_view(first, second, &text));
            }
            Err(e) => {
                warn!(error = %e, doc1 = first, doc2 = second, "comparison failed");
                self.view.toast(Toast::error(e.user_message()));
            }
        }
    }

    /// Ask the server to write the latest result to a PDF.
    ///
    /// Returns the server-side file name on success.
    pub async fn export(&mut self, filename: Option<&str>) -> Option<String> {
        self.view.set_busy(true);
        let result = self.backend.export(filename).await;
        self.view.set_busy(false);

        match result {
            Ok(saved) => {
                info!(filename = %saved, "export saved");
                self.view.toast(Toast::success(format!("PDF saved: {saved}")));
                self.view.export_ready(&saved);
                self.last_export = Some(saved.clone());
                Some(saved)
            }
            Err(e) => {
                warn!(error = %e, "export failed");
                self.view.toast(Toast::error(e.user_message()));
                None
            }
        }
    }

    /// Fetch an exported file into `dir`. Defaults to the last export.
    pub async fn download(&mut self, filename: Option<&str>, dir: &Path) -> Option<PathBuf> {
        let Some(filename) = filename
            .map(str::to_string)
            .or_else(|| self.last_export.clone())
        else {
            self.view.toast(Toast::error("Nothing has been exported yet"));
            return None;
        };

        self.view.set_busy(true);
        let result = self.backend.download(&filename).await;
        self.view.set_busy(false);

        let bytes = match result {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, filename = %filename, "download failed");
                self.view.toast(Toast::error(e.user_message()));
                return None;
            }
        };

        // Keep only the final component of a server-supplied name.
        let local_name = Path::new(&filename)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "export.pdf".into());
        let target = dir.join(local_name);
        match tokio::fs::write(&target, &bytes).await {
            Ok(()) => {
                info!(path = %target.display(), bytes = bytes.len(), "export downloaded");
                self.view
                    .toast(Toast::success(format!("Downloaded to {}", target.display())));
                Some(target)
            }
            Err(e) => {
                warn!(error = %e, path = %target.display(), "could not write download");
                self.view.toast(Toast::error(format!(
                    "Could not write {}: {e}",
                    target.display()
                )));
                None
            }
        }
    }
}
