//! System endpoints: health check.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::app_state::AppState;

/// Health check response: liveness plus the identity of the deployed pool.
#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    manager: String,
    pool_account: String,
    token_a: String,
    token_b: String,
    /// Open WebSocket event subscriptions.
    ws_subscribers: usize,
    timestamp: String,
}

/// `GET /health`: service status and pool identity.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Reports liveness, the crate version, the manager and pool accounts, both token symbols, and the number of live event subscribers.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
    )
)]
pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let pool = state.dex_service.pool_state().await;
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        manager: pool.manager.to_string(),
        pool_account: pool.pool_account.to_string(),
        token_a: pool.token_a.symbol,
        token_b: pool.token_b.symbol,
        // The service keeps no receiver of its own, so every receiver is a
        // ws connection.
        ws_subscribers: state.event_bus.receiver_count(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// System routes mounted at the root level (not under /api/v1).
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
