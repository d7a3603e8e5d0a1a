use std::path::Path;

use legalese_client::Backend;
use legalese_client::wire::SAMPLE_FILE_NAME;
use legalese_core::{DroppedFile, UploadError, UploadRequest};
use tracing::{info, warn};

use super::Controller;
use crate::toast::Toast;
use crate::view::View;

impl<B: Backend, V: View> Controller<B, V> {
    /// Upload a file picked from disk.
    pub async fn upload_path(&mut self, path: &Path, display_name: Option<&str>) {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(source) => {
                let e = UploadError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                self.view.toast(Toast::error(format!("Upload failed: {e}")));
                return;
            }
        };
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        match UploadRequest::new(file_name, bytes, display_name) {
            Ok(request) => {
                self.upload(request).await;
            }
            Err(e) => self.view.toast(Toast::error(format!("Upload failed: {e}"))),
        }
    }

    /// Upload the first file of a drop gesture. An empty drop does nothing.
    pub async fn upload_drop(&mut self, files: Vec<DroppedFile>, display_name: Option<&str>) {
        if files.len() > 1 {
            self.view.toast(Toast::info(format!(
                "{} files dropped; only the first is uploaded",
                files.len()
            )));
        }
        match UploadRequest::from_drop(files, display_name) {
            None => {}
            Some(Ok(request)) => {
                self.upload(request).await;
            }
            Some(Err(e)) => self.view.toast(Toast::error(format!("Upload failed: {e}"))),
        }
    }

    /// Send a validated request. On success the name field is cleared and
    /// the registry refreshed.
    pub async fn upload(&mut self, request: UploadRequest) -> bool {
        self.view.set_busy(true);
        let result = self.backend.upload(&request).await;
        self.view.set_busy(false);

        match result {
            Ok(receipt) => {
                let name = receipt
                    .doc_name
                    .unwrap_or_else(|| request.doc_name().to_string());
                info!(doc_name = %name, "document uploaded");
                self.view.clear_upload_name();
                self.view.toast(Toast::success(format!("Document loaded: {name}")));
                self.refresh().await;
                true
            }
            Err(e) => {
                warn!(error = %e, file = request.file_name(), "upload failed");
                self.view.toast(Toast::error(e.user_message()));
                false
            }
        }
    }

    /// Fetch the bundled sample and upload it like any other file.
    pub async fn load_sample(&mut self) {
        self.view.set_busy(true);
        let fetched = self.backend.sample_document().await;
        self.view.set_busy(false);

        let bytes = match fetched {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "sample fetch failed");
                self.view
                    .toast(Toast::error(format!("Could not load sample: {}", e.user_message())));
                return;
            }
        };
        match UploadRequest::new(SAMPLE_FILE_NAME, bytes, None) {
            Ok(request) => {
                self.upload(request).await;
            }
            Err(e) => self.view.toast(Toast::error(format!("Upload failed: {e}"))),
        }
    }
}
