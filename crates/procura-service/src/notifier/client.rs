//! Brevo transactional email API client.

use reqwest::Client;
use std::time::Duration;

use super::types::{EmailMessage, SendEmailResponse};

/// Error type for notification operations.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The email API returned an error status.
    #[error("Brevo API error: {status} - {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body, as returned.
        message: String,
    },

    /// No delivery attempt was made.
    #[error("no delivery attempts made")]
    NoAttempts,
}

/// Brevo API client.
#[derive(Debug, Clone)]
pub struct BrevoMailer {
    client: Client,
    base_url: String,
    api_key: String,
}

impl BrevoMailer {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Brevo API URL (e.g. `"https://api.brevo.com"`)
    /// * `api_key` - Brevo API key
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, NotifyError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    /// Send a transactional email.
    ///
    /// # Errors
    ///
    /// Returns [`NotifyError::Api`] when the API rejects the message, or an
    /// HTTP error when the request itself fails.
    pub async fn send(&self, message: &EmailMessage) -> Result<SendEmailResponse, NotifyError> {
        let url = format!("{}/v3/smtp/email", self.base_url);

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await.unwrap_or_default());
        }

        let message = response
            .text()
            .await
            .unwrap_or_else(|_| format!("HTTP {status}"));
        Err(NotifyError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let mailer = BrevoMailer::new("https://api.brevo.com/", "key").unwrap();
        assert_eq!(mailer.base_url, "https://api.brevo.com");
    }
}
