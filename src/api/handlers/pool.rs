//! Pool state handler.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::PoolStateResponse;
use crate::app_state::AppState;

/// `GET /pool`: Pool configuration and live reserves.
#[utoipa::path(
    get,
    path = "/api/v1/pool",
    tag = "Pool",
    summary = "Get pool state",
    description = "Returns the manager, the pool account, both tokens' metadata, and the pool's current balance of each token.",
    responses(
        (status = 200, description = "Pool state", body = PoolStateResponse),
    )
)]
pub async fn get_pool(State(state): State<AppState>) -> impl IntoResponse {
    Json(PoolStateResponse::from(state.dex_service.pool_state().await))
}

/// Pool routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/pool", get(get_pool))
}
