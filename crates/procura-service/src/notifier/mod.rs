//! Email notification dispatch.
//!
//! Notifications are one-way: after the store write succeeds the email is
//! handed to a spawned task with its own bounded retry policy. A delivery
//! failure is logged and swallowed; it never propagates to the caller and
//! never undoes a persisted change.

mod client;
mod templates;
mod types;

pub use client::{BrevoMailer, NotifyError};
pub use templates::{decision_email, new_request_email};
pub use types::{EmailMessage, EmailParty};

use std::sync::Arc;
use std::time::Duration;

/// Maximum number of delivery attempts per notification.
const SEND_MAX_RETRIES: u32 = 3;

/// Initial backoff duration for retries (doubles with each attempt).
const SEND_INITIAL_BACKOFF_MS: u64 = 100;

/// Maximum backoff duration for retries.
const SEND_MAX_BACKOFF_MS: u64 = 5000;

/// Dispatch a notification without blocking the caller.
///
/// Does nothing (beyond a debug log) when the mailer is not configured.
pub fn dispatch(mailer: Option<Arc<BrevoMailer>>, message: EmailMessage) {
    let Some(mailer) = mailer else {
        tracing::debug!(subject = %message.subject, "mailer not configured, dropping notification");
        return;
    };

    tokio::spawn(async move {
        if let Err(e) = send_with_retry(&mailer, &message).await {
            tracing::warn!(
                subject = %message.subject,
                error = %e,
                "Failed to send notification after all retries"
            );
        }
    });
}

async fn send_with_retry(mailer: &BrevoMailer, message: &EmailMessage) -> Result<(), NotifyError> {
    let mut backoff_ms = SEND_INITIAL_BACKOFF_MS;
    let mut last_error = None;

    for attempt in 1..=SEND_MAX_RETRIES {
        match mailer.send(message).await {
            Ok(response) => {
                tracing::info!(
                    subject = %message.subject,
                    message_id = ?response.message_id,
                    "Notification sent"
                );
                return Ok(());
            }
            Err(e) => {
                tracing::debug!(
                    attempt,
                    error = %e,
                    "Notification send attempt failed"
                );
                last_error = Some(e);
                if attempt < SEND_MAX_RETRIES {
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                    backoff_ms = (backoff_ms * 2).min(SEND_MAX_BACKOFF_MS);
                }
            }
        }
    }

    Err(last_error.unwrap_or(NotifyError::NoAttempts))
}
