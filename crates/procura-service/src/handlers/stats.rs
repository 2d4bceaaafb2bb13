//! Aggregate statistics handler.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

/// Aggregate statistics response.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Number of pending requests.
    pub pendientes: i64,
    /// Number of approved requests.
    pub aprobadas: i64,
    /// Number of rejected requests.
    pub rechazadas: i64,
    /// Sum of amounts over approved requests, in currency units.
    #[serde(rename = "valorTotal")]
    pub valor_total: f64,
    /// Sum of amounts over pending requests, in currency units.
    #[serde(rename = "valorPendiente")]
    pub valor_pendiente: f64,
}

/// Current counts and amount sums, computed from store state on each call.
pub async fn stats(State(state): State<Arc<AppState>>) -> Result<Json<StatsResponse>, ApiError> {
    let stats = state.store.stats().await?;

    Ok(Json(StatsResponse {
        pendientes: stats.pending,
        aprobadas: stats.approved,
        rechazadas: stats.rejected,
        valor_total: cents_to_units(stats.approved_amount_cents),
        valor_pendiente: cents_to_units(stats.pending_amount_cents),
    }))
}

fn cents_to_units(cents: i64) -> f64 {
    cents as f64 / 100.0
}
