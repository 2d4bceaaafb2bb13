//! Procura HTTP API service.
//!
//! This crate provides the HTTP API for the purchase-request approval
//! workflow, including:
//!
//! - Request submission with quotation upload
//! - Filtered listing and aggregate statistics for the admin view
//! - Approve/reject transitions with email notification
//!
//! Notifications are fire-and-forget: they are dispatched after the store
//! write succeeds and a delivery failure never affects the HTTP response.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Thin read handlers need async for routing

pub mod attachments;
pub mod config;
pub mod error;
pub mod handlers;
pub mod notifier;
pub mod routes;
pub mod state;

pub use attachments::{AttachmentError, AttachmentStore, DiskAttachments};
pub use config::ServiceConfig;
pub use error::ApiError;
pub use notifier::{BrevoMailer, EmailMessage, NotifyError};
pub use routes::create_router;
pub use state::AppState;
