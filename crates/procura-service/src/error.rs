//! API error types and responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use procura_core::ValidationError;
use procura_store::StoreError;

use crate::attachments::AttachmentError;

/// API error type.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Bad request - invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Conflict - the request was already resolved.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

/// JSON error response body: `{"error": "..."}` per the wire contract.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Conflict(msg) => (StatusCode::CONFLICT, msg),
            Self::Internal(msg) => {
                // Log the detail, never leak it to the caller.
                tracing::error!(error = %msg, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocurrió un error interno.".to_string(),
                )
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => {
                Self::NotFound("No se encontró la solicitud".to_string())
            }
            StoreError::InvalidTransition { status, .. } => Self::Conflict(format!(
                "La solicitud ya fue resuelta ({status})"
            )),
            StoreError::Database(e) => Self::Internal(e.to_string()),
            StoreError::Decode(msg) => Self::Internal(msg),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(format!(
            "Campos faltantes o inválidos: {}",
            err.fields.join(", ")
        ))
    }
}

impl From<AttachmentError> for ApiError {
    fn from(err: AttachmentError) -> Self {
        match err {
            AttachmentError::UnsupportedType(ext) => {
                Self::BadRequest(format!("Tipo de archivo no permitido: {ext}"))
            }
            AttachmentError::Io(e) => Self::Internal(e.to_string()),
        }
    }
}
