//! reqwest implementation of [`Backend`].

use async_trait::async_trait;
use legalese_core::{ClientConfig, Concern, DocumentDescriptor, UploadRequest};
use reqwest::Url;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use tracing::{debug, info};

use crate::backend::Backend;
use crate::envelope::{is_success_status, parse_envelope, parse_listing};
use crate::error::ApiError;
use crate::wire::*;

/// HTTP client for the legalese server.
///
/// No retries and no cancellation. A timeout applies only when the config
/// asks for one.
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Download URL with `filename` encoded as a single path segment.
    fn download_url(&self, filename: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ApiError::Url(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["api", "download", filename]);
        Ok(url)
    }

    async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
        fallback: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        debug!(url = %url, "POST");
        let resp = self.client.post(&url).json(body).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        parse_envelope(status, &text, fallback)
    }

    async fn get_bytes(&self, url: Url) -> Result<Vec<u8>, ApiError> {
        debug!(url = %url, "GET");
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp.bytes().await?.to_vec())
    }
}

#[async_trait]
impl Backend for ApiClient {
    async fn upload(&self, request: &UploadRequest) -> Result<UploadReceipt, ApiError> {
        let url = self.url(UPLOAD_PATH);
        let mime = mime_guess::from_path(request.file_name()).first_or_octet_stream();
        let part = Part::bytes(request.bytes().to_vec())
            .file_name(request.file_name().to_string())
            .mime_str(mime.as_ref())?;
        let form = Form::new()
            .part("file", part)
            .text("doc_name", request.doc_name().to_string());

        info!(
            url = %url,
            doc_name = request.doc_name(),
            bytes = request.bytes().len(),
            "uploading document"
        );
        let resp = self.client.post(&url).multipart(form).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        let receipt: UploadReceipt = parse_envelope(status, &text, "Upload failed")?;
        info!(doc_name = ?receipt.doc_name, length = ?receipt.length, "upload accepted");
        Ok(receipt)
    }

    async fn list_documents(&self) -> Result<Vec<DocumentDescriptor>, ApiError> {
        let url = self.url(DOCUMENTS_PATH);
        debug!(url = %url, "GET");
        let resp = self.client.get(&url).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        let listing: DocumentsResponse = parse_listing(status, &text, "Failed to load documents")?;
        info!(count = listing.documents.len(), "fetched document list");
        Ok(listing.documents)
    }

    async fn analyze(&self, doc_name: &str) -> Result<String, ApiError> {
        info!(doc_name, "requesting analysis");
        let resp: AnalysisResponse = self
            .post_json(ANALYZE_PATH, &DocRequest { doc_name }, "Analysis failed")
            .await?;
        Ok(resp.analysis)
    }

    async fn concerns(&self, doc_name: &str) -> Result<Vec<Concern>, ApiError> {
        info!(doc_name, "requesting concerns");
        let resp: ConcernsResponse = self
            .post_json(CONCERNS_PATH, &DocRequest { doc_name }, "Failed to load concerns")
            .await?;
        info!(count = resp.concerns.len(), "concerns received");
        Ok(resp.concerns)
    }

    async fn compare(&self, doc1: &str, doc2: &str) -> Result<String, ApiError> {
        info!(doc1, doc2, "requesting comparison");
        let resp: ComparisonResponse = self
            .post_json(COMPARE_PATH, &CompareRequest { doc1, doc2 }, "Comparison failed")
            .await?;
        Ok(resp.comparison)
    }

    async fn export(&self, filename: Option<&str>) -> Result<String, ApiError> {
        let normalized = normalize_export_name(filename);
        info!(filename = ?normalized, "exporting analysis");
        let resp: ExportResponse = self
            .post_json(
                EXPORT_PATH,
                &ExportRequest {
                    filename: normalized.as_deref(),
                },
                "Export failed",
            )
            .await?;
        Ok(resp.filename)
    }

    async fn download(&self, filename: &str) -> Result<Vec<u8>, ApiError> {
        let url = self.download_url(filename)?;
        info!(url = %url, "downloading export");
        self.get_bytes(url).await
    }

    async fn chat(&self, message: &str, doc_name: Option<&str>) -> Result<String, ApiError> {
        info!(doc_name = ?doc_name, chars = message.len(), "sending chat turn");
        let resp: ChatResponse = self
            .post_json(CHAT_PATH, &ChatRequest { message, doc_name }, "Chat request failed")
            .await?;
        Ok(resp.response)
    }

    async fn clear_chat(&self) -> Result<(), ApiError> {
        let url = self.url(CLEAR_PATH);
        info!(url = %url, "clearing conversation");
        let resp = self.client.post(&url).send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;
        // A bare 2xx (including 204) carries no envelope to check.
        if is_success_status(status) && text.trim().is_empty() {
            return Ok(());
        }
        let _: IgnoredAny = parse_envelope(status, &text, "Failed to clear conversation")?;
        Ok(())
    }

    async fn sample_document(&self) -> Result<Vec<u8>, ApiError> {
        let url = Url::parse(&self.url(SAMPLE_PATH)).map_err(|e| ApiError::Url(e.to_string()))?;
        info!(url = %url, "fetching sample document");
        self.get_bytes(url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn client(base: &str) -> ApiClient {
        ApiClient::new(&ClientConfig::new(base)).unwrap()
    }

    fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
        haystack.windows(needle.len()).position(|w| w == needle)
    }

    /// Accept one connection on a loopback port, answer it with `status` and
    /// `body`, and hand back the raw request.
    async fn serve_once(status: &'static str, body: &[u8]) -> (String, JoinHandle<Vec<u8>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let body = body.to_vec();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut chunk = [0u8; 4096];

            let header_end = loop {
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break request.len();
                }
                request.extend_from_slice(&chunk[..n]);
                if let Some(pos) = find(&request, b"\r\n\r\n") {
                    break pos + 4;
                }
            };
            let head = String::from_utf8_lossy(&request[..header_end]).to_ascii_lowercase();
            let content_length = head
                .lines()
                .find_map(|l| l.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok());
            let chunked = head.contains("transfer-encoding: chunked");
            loop {
                let complete = match content_length {
                    Some(len) => request.len() >= header_end + len,
                    None if chunked => request.ends_with(b"0\r\n\r\n"),
                    None => true,
                };
                if complete {
                    break;
                }
                let n = socket.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&chunk[..n]);
            }

            let mut response = format!("HTTP/1.1 {status}\r\nConnection: close\r\n");
            if !status.starts_with("204") {
                response.push_str(&format!("Content-Length: {}\r\n", body.len()));
            }
            response.push_str("\r\n");
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.write_all(&body).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });
        (base, handle)
    }

    fn request_line(raw: &[u8]) -> String {
        let text = String::from_utf8_lossy(raw);
        text.lines().next().unwrap_or_default().to_string()
    }

    fn request_body(raw: &[u8]) -> String {
        let start = find(raw, b"\r\n\r\n").map(|p| p + 4).unwrap_or(raw.len());
        String::from_utf8_lossy(&raw[start..]).into_owned()
    }

    #[test]
    fn api_client_trims_trailing_slash() {
        let client = client("http://localhost:5000/");
        assert_eq!(client.base_url(), "http://localhost:5000");
        assert_eq!(client.url(ANALYZE_PATH), "http://localhost:5000/api/analyze");
    }

    #[test]
    fn download_url_encodes_filename() {
        let client = client("http://localhost:5000");
        let url = client.download_url("my report #1.pdf").unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:5000/api/download/my%20report%20%231.pdf"
        );
    }

    #[test]
    fn download_url_rejects_slash_smuggling() {
        let client = client("http://localhost:5000");
        let url = client.download_url("../secrets").unwrap();
        assert_eq!(url.path(), "/api/download/..%2Fsecrets");
    }

    #[test]
    fn bad_base_url_is_reported() {
        let client = client("not a url");
        assert!(matches!(client.download_url("x.pdf"), Err(ApiError::Url(_))));
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let client = client("http://127.0.0.1:1");
        let err = client.list_documents().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
    }

    // ── Loopback exchanges ──

    #[tokio::test]
    async fn clear_accepts_empty_ok_body() {
        let (base, server) = serve_once("200 OK", b"").await;
        client(&base).clear_chat().await.unwrap();
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/clear "));
    }

    #[tokio::test]
    async fn clear_accepts_no_content() {
        let (base, server) = serve_once("204 No Content", b"").await;
        client(&base).clear_chat().await.unwrap();
        server.await.unwrap();
    }

    #[tokio::test]
    async fn clear_still_honours_a_rejection() {
        let (base, server) =
            serve_once("200 OK", br#"{"success": false, "error": "Session store down"}"#).await;
        let err = client(&base).clear_chat().await.unwrap_err();
        assert!(matches!(err, ApiError::Rejected(msg) if msg == "Session store down"));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn upload_sends_file_and_display_name_fields() {
        let (base, server) = serve_once(
            "200 OK",
            br#"{"success": true, "doc_name": "Office lease", "length": 5, "message": "ok"}"#,
        )
        .await;
        let request = UploadRequest::new("lease.txt", b"Lease".to_vec(), Some("Office lease")).unwrap();
        let receipt = client(&base).upload(&request).await.unwrap();
        assert_eq!(receipt.doc_name.as_deref(), Some("Office lease"));
        assert_eq!(receipt.length, Some(5));

        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/upload "));
        let text = String::from_utf8_lossy(&raw).to_ascii_lowercase();
        assert!(text.contains("content-type: multipart/form-data; boundary="));
        assert!(text.contains(r#"name="file"; filename="lease.txt""#));
        assert!(text.contains("content-type: text/plain"));
        assert!(text.contains(r#"name="doc_name""#));
        let body = request_body(&raw);
        assert!(body.contains("Office lease"));
        assert!(body.contains("Lease"));
    }

    #[tokio::test]
    async fn list_documents_reads_listing() {
        let (base, server) = serve_once(
            "200 OK",
            br#"{"documents": [{"name": "A", "loaded_at": "2024-01-01 10:00:00", "length": 12}]}"#,
        )
        .await;
        let docs = client(&base).list_documents().await.unwrap();
        assert_eq!(docs, [DocumentDescriptor::new("A", "2024-01-01 10:00:00", 12)]);
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("GET /api/documents "));
    }

    #[tokio::test]
    async fn analyze_posts_document_name() {
        let (base, server) =
            serve_once("200 OK", br#"{"success": true, "analysis": "Plain words"}"#).await;
        let text = client(&base).analyze("lease.txt").await.unwrap();
        assert_eq!(text, "Plain words");

        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/analyze "));
        assert!(String::from_utf8_lossy(&raw)
            .to_ascii_lowercase()
            .contains("content-type: application/json"));
        assert_eq!(request_body(&raw), r#"{"doc_name":"lease.txt"}"#);
    }

    #[tokio::test]
    async fn concerns_survive_null_text_fields() {
        let (base, server) = serve_once(
            "200 OK",
            br#"{"success":true,"concerns":[{"severity":"HIGH","clause":"No refunds","concern":"One-sided","recommendation":null}]}"#,
        )
        .await;
        let concerns = client(&base).concerns("A").await.unwrap();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].clause, "No refunds");
        assert_eq!(concerns[0].recommendation, "");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/concerns "));
    }

    #[tokio::test]
    async fn compare_posts_both_names() {
        let (base, server) =
            serve_once("200 OK", br#"{"success": true, "comparison": "B is stricter"}"#).await;
        let text = client(&base).compare("A", "B").await.unwrap();
        assert_eq!(text, "B is stricter");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/compare "));
        assert_eq!(request_body(&raw), r#"{"doc1":"A","doc2":"B"}"#);
    }

    #[tokio::test]
    async fn export_sends_normalised_name() {
        let (base, server) =
            serve_once("200 OK", br#"{"success": true, "filename": "summary.pdf"}"#).await;
        let saved = client(&base).export(Some("summary")).await.unwrap();
        assert_eq!(saved, "summary.pdf");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/save-pdf "));
        assert_eq!(request_body(&raw), r#"{"filename":"summary.pdf"}"#);
    }

    #[tokio::test]
    async fn chat_without_document_sends_null() {
        let (base, server) =
            serve_once("200 OK", br#"{"success": true, "response": "Hello"}"#).await;
        let reply = client(&base).chat("Hi", None).await.unwrap();
        assert_eq!(reply, "Hello");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("POST /api/chat "));
        assert_eq!(request_body(&raw), r#"{"message":"Hi","doc_name":null}"#);
    }

    #[tokio::test]
    async fn html_error_page_maps_to_status() {
        let (base, server) =
            serve_once("500 Internal Server Error", b"<h1>Internal Server Error</h1>").await;
        let err = client(&base).analyze("A").await.unwrap_err();
        match err {
            ApiError::Status { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "<h1>Internal Server Error</h1>");
            }
            other => panic!("expected status error, got {other:?}"),
        }
        server.await.unwrap();
    }

    #[tokio::test]
    async fn download_returns_raw_bytes() {
        let (base, server) = serve_once("200 OK", b"%PDF-1.4 bytes").await;
        let bytes = client(&base).download("my report.pdf").await.unwrap();
        assert_eq!(bytes, b"%PDF-1.4 bytes");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("GET /api/download/my%20report.pdf "));
    }

    #[tokio::test]
    async fn missing_download_is_a_status_error() {
        let (base, server) = serve_once("404 Not Found", b"File not found").await;
        let err = client(&base).download("gone.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 404, .. }));
        server.await.unwrap();
    }

    #[tokio::test]
    async fn sample_is_fetched_from_static_path() {
        let (base, server) = serve_once("200 OK", b"SAMPLE LEASE").await;
        let bytes = client(&base).sample_document().await.unwrap();
        assert_eq!(bytes, b"SAMPLE LEASE");
        let raw = server.await.unwrap();
        assert!(request_line(&raw).starts_with("GET /static/sample-legal-document.txt "));
    }
}
