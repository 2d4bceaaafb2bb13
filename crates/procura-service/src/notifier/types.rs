//! Wire types for the Brevo transactional email API.

use serde::{Deserialize, Serialize};

/// An email sender or recipient.
#[derive(Debug, Clone, Serialize)]
pub struct EmailParty {
    /// Display name (omitted when absent).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Email address.
    pub email: String,
}

impl EmailParty {
    /// A bare address with no display name.
    #[must_use]
    pub fn address(email: impl Into<String>) -> Self {
        Self {
            name: None,
            email: email.into(),
        }
    }

    /// An address with a display name.
    #[must_use]
    pub fn named(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            email: email.into(),
        }
    }
}

/// A transactional email in the shape the Brevo API expects.
#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    /// Sender identity.
    pub sender: EmailParty,

    /// Recipients.
    pub to: Vec<EmailParty>,

    /// Subject line.
    pub subject: String,

    /// HTML body.
    #[serde(rename = "htmlContent")]
    pub html_content: String,
}

/// Response from a successful send.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SendEmailResponse {
    /// Provider-assigned message id, when returned.
    #[serde(rename = "messageId")]
    pub message_id: Option<String>,
}
