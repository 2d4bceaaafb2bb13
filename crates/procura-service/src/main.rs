//! Procura Service - HTTP API for the purchase-request approval workflow.
//!
//! This is the main entry point for the procura service.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use procura_service::{create_router, AppState, DiskAttachments, ServiceConfig};
use procura_store::PgStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,procura=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Procura Service");

    // Load configuration from environment
    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        uploads_dir = %config.uploads_dir,
        brevo_configured = %config.brevo_api_url.is_some(),
        reviewer_email = %config.reviewer_email,
        "Service configuration loaded"
    );

    // Connect to PostgreSQL and run migrations
    tracing::info!("Connecting to PostgreSQL");
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await?;
    procura_store::migrator().run(&pool).await?;

    let store = Arc::new(PgStore::new(pool));
    let attachments = Arc::new(DiskAttachments::new(
        &config.uploads_dir,
        &config.public_uploads_path,
    ));

    // Build app state
    let state = AppState::new(store, attachments, config.clone());

    // Create the router
    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    // Start HTTP server
    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
