use legalese_client::Backend;
use tracing::{info, warn};

use super::Controller;
use crate::render::document_list_view;
use crate::toast::Toast;
use crate::view::View;

impl<B: Backend, V: View> Controller<B, V> {
    /// Re-read the document list and replace the registry.
    ///
    /// Failures are logged only; the previous snapshot stays on screen.
    pub async fn refresh(&mut self) {
        match self.backend.list_documents().await {
            Ok(documents) => {
                self.session.replace_documents(documents);
                info!(
                    count = self.session.documents().len(),
                    current = ?self.session.current(),
                    "document registry refreshed"
                );
                self.view.show_documents(document_list_view(&self.session));
            }
            Err(e) => warn!(error = %e, "failed to load documents"),
        }
    }

    /// Make `name` the current document. Returns `false` for unknown names.
    pub fn select(&mut self, name: &str) -> bool {
        match self.session.select(name) {
            Ok(()) => {
                info!(name, "document selected");
                self.view.show_documents(document_list_view(&self.session));
                true
            }
            Err(e) => {
                self.view.toast(Toast::error(format!("Cannot select: {e}")));
                false
            }
        }
    }
}
