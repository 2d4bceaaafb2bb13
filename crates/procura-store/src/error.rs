//! Error types for procura storage.

use procura_core::{RequestId, RequestStatus};

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors that can occur in storage operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be decoded into a domain value.
    #[error("decode error: {0}")]
    Decode(String),

    /// No request exists with the given id.
    #[error("request not found: {id}")]
    NotFound {
        /// The id that was not found.
        id: RequestId,
    },

    /// The request has already been resolved; terminal statuses admit no
    /// further transitions.
    #[error("request {id} is already {status}")]
    InvalidTransition {
        /// The request id.
        id: RequestId,
        /// The current (terminal) status.
        status: RequestStatus,
    },
}
