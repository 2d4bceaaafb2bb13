//! Common test utilities for procura integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use tempfile::TempDir;

use procura_service::{create_router, AppState, DiskAttachments, ServiceConfig};
use procura_store::MemoryStore;

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Direct handle to the backing store.
    pub store: Arc<MemoryStore>,
    /// Temporary uploads directory (kept alive for test duration).
    pub _uploads_dir: TempDir,
}

impl TestHarness {
    /// Create a harness with notifications disabled.
    pub fn new() -> Self {
        Self::with_mailer(None)
    }

    /// Create a harness whose mailer points at the given Brevo-compatible
    /// base URL (a wiremock server in practice).
    pub fn with_mailer(brevo_url: Option<String>) -> Self {
        let uploads_dir = TempDir::new().expect("Failed to create temp directory");
        let store = Arc::new(MemoryStore::new());

        let brevo_api_key = brevo_url.as_ref().map(|_| "test-key".to_string());
        let config = ServiceConfig {
            uploads_dir: uploads_dir.path().to_string_lossy().to_string(),
            brevo_api_url: brevo_url,
            brevo_api_key,
            ..ServiceConfig::default()
        };

        let attachments = Arc::new(DiskAttachments::new(
            uploads_dir.path(),
            config.public_uploads_path.clone(),
        ));
        let state = AppState::new(store.clone(), attachments, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            store,
            _uploads_dir: uploads_dir,
        }
    }

    /// Submit a valid request through the HTTP API and return its id.
    pub async fn submit(&self, requester: &str, vendor: &str, amount: &str, payment: &str) -> i64 {
        self.server
            .post("/api/solicitudes")
            .multipart(form(requester, vendor, amount, payment))
            .await
            .assert_status_ok();

        // The newest pending request sorts first.
        let listed: serde_json::Value = self
            .server
            .get("/api/solicitudes")
            .add_query_param("estado", "Pendiente")
            .await
            .json();
        listed[0]["id"].as_i64().expect("listed request should have an id")
    }

    /// Apply a decision through the HTTP API.
    pub async fn decide(&self, id: i64, estado: &str) -> axum_test::TestResponse {
        self.server
            .put(&format!("/api/solicitudes/{id}"))
            .json(&serde_json::json!({ "estado": estado }))
            .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete, valid submission form without an attachment.
pub fn form(requester: &str, vendor: &str, amount: &str, payment: &str) -> MultipartForm {
    MultipartForm::new()
        .add_text("responsable", requester)
        .add_text("correo", format!("{}@example.com", requester.to_lowercase().replace(' ', ".")))
        .add_text("proveedor", vendor)
        .add_text("nit", "900123456-7")
        .add_text("valor", amount)
        .add_text("medioPago", payment)
}

/// A valid form carrying a small PDF attachment.
pub fn form_with_attachment(requester: &str, filename: &str, bytes: &[u8]) -> MultipartForm {
    form(requester, "Suministros SA", "1500", "Transferencia").add_part(
        "cotizacion",
        Part::bytes(bytes.to_vec())
            .file_name(filename)
            .mime_type("application/pdf"),
    )
}

/// Wait until the wiremock server has received at least `count` requests.
pub async fn wait_for_requests(server: &wiremock::MockServer, count: usize) -> Vec<wiremock::Request> {
    for _ in 0..200 {
        let received = server.received_requests().await.unwrap_or_default();
        if received.len() >= count {
            return received;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("timed out waiting for {count} notification request(s)");
}
