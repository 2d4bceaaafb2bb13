//! Application state.

use std::sync::Arc;

use procura_store::Store;

use crate::attachments::AttachmentStore;
use crate::config::ServiceConfig;
use crate::notifier::BrevoMailer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The request store.
    pub store: Arc<dyn Store>,

    /// Quotation file storage.
    pub attachments: Arc<dyn AttachmentStore>,

    /// Email client for notifications (optional).
    pub mailer: Option<Arc<BrevoMailer>>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    ///
    /// The mailer is built from configuration when a Brevo URL and key are
    /// both present; otherwise notifications are disabled with a warning.
    #[must_use]
    pub fn new(
        store: Arc<dyn Store>,
        attachments: Arc<dyn AttachmentStore>,
        config: ServiceConfig,
    ) -> Self {
        let mailer = config
            .brevo_api_url
            .as_ref()
            .zip(config.brevo_api_key.as_ref())
            .and_then(|(url, key)| match BrevoMailer::new(url, key) {
                Ok(client) => {
                    tracing::info!(brevo_url = %url, "Email notifications enabled");
                    Some(Arc::new(client))
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create Brevo client");
                    None
                }
            });

        if mailer.is_none() {
            tracing::warn!("Brevo not configured - notifications will not be sent");
        }

        Self {
            store,
            attachments,
            mailer,
            config,
        }
    }

    /// Check if the mailer is configured.
    #[must_use]
    pub fn has_mailer(&self) -> bool {
        self.mailer.is_some()
    }
}
