//! Service configuration.

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:3000").
    pub listen_addr: String,

    /// PostgreSQL connection string.
    pub database_url: String,

    /// Directory where uploaded quotation files are stored.
    pub uploads_dir: String,

    /// Public URL path prefix under which stored uploads are served.
    pub public_uploads_path: String,

    /// Brevo transactional email API URL (optional; notifications are
    /// disabled when unset).
    pub brevo_api_url: Option<String>,

    /// Brevo API key (optional).
    pub brevo_api_key: Option<String>,

    /// Display name used as the email sender.
    pub sender_name: String,

    /// Address used as the email sender.
    pub sender_email: String,

    /// Fixed internal reviewer address notified on every new submission.
    pub reviewer_email: String,

    /// Admin portal URL linked from the reviewer notification.
    pub admin_portal_url: String,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum uploaded file size in bytes (default: 5 MiB).
    pub max_upload_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into()),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/procura".into()),
            uploads_dir: std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".into()),
            public_uploads_path: std::env::var("PUBLIC_UPLOADS_PATH")
                .unwrap_or_else(|_| "/uploads".into()),
            brevo_api_url: std::env::var("BREVO_API_URL").ok(),
            brevo_api_key: std::env::var("BREVO_API_KEY").ok(),
            sender_name: std::env::var("SENDER_NAME")
                .unwrap_or_else(|_| "Sistema de Compras".into()),
            sender_email: std::env::var("SENDER_EMAIL")
                .unwrap_or_else(|_| "notificaciones@example.com".into()),
            reviewer_email: std::env::var("REVIEWER_EMAIL")
                .unwrap_or_else(|_| "compras@example.com".into()),
            admin_portal_url: std::env::var("ADMIN_PORTAL_URL")
                .unwrap_or_else(|_| "http://localhost:3000/admin".into()),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_upload_bytes: std::env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024), // 5 MiB
            request_timeout_seconds: std::env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:3000".into(),
            database_url: "postgres://localhost/procura".into(),
            uploads_dir: "uploads".into(),
            public_uploads_path: "/uploads".into(),
            brevo_api_url: None,
            brevo_api_key: None,
            sender_name: "Sistema de Compras".into(),
            sender_email: "notificaciones@example.com".into(),
            reviewer_email: "compras@example.com".into(),
            admin_portal_url: "http://localhost:3000/admin".into(),
            cors_origins: vec!["*".into()],
            max_upload_bytes: 5 * 1024 * 1024,
            request_timeout_seconds: 30,
        }
    }
}
