//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, requests, stats};
use crate::state::AppState;

/// Maximum concurrent requests for API endpoints.
const API_MAX_CONCURRENT_REQUESTS: usize = 50;

/// Slack added to the upload limit for multipart boundaries and the other
/// form fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
/// - `GET /uploads/*` - Stored quotation files
///
/// ## API
/// - `POST /api/solicitudes` - Submit a purchase request (multipart)
/// - `GET /api/solicitudes` - Filtered listing in work-queue order
/// - `PUT /api/solicitudes/:id` - Approve or reject a pending request
/// - `GET /api/stats` - Aggregate counts and amount sums
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors_origins = state.config.cors_origins.clone();
    let uploads_dir = state.config.uploads_dir.clone();
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let cors = build_cors_layer(&cors_origins);

    let state = Arc::new(state);

    let api_routes = Router::new()
        .route(
            "/solicitudes",
            get(requests::list_requests).post(requests::submit_request),
        )
        .route("/solicitudes/:id", put(requests::update_status))
        .route("/stats", get(stats::stats))
        .layer(ConcurrencyLimitLayer::new(API_MAX_CONCURRENT_REQUESTS));

    Router::new()
        // Health (public)
        .route("/health", get(health::health))
        // API routes
        .nest("/api", api_routes)
        // Locally stored quotation files
        .nest_service("/uploads", ServeDir::new(uploads_dir))
        // Global middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(RequestBodyLimitLayer::new(body_limit))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
