//! Swap endpoint handlers.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{SwapRequest, SwapResponse, parse_account, parse_amount};
use crate::app_state::AppState;
use crate::domain::SwapDirection;
use crate::error::{DexError, ErrorResponse};

/// `POST /swap/a-for-b`: Sell token A for token B at 1:1.
///
/// # Errors
///
/// Returns [`DexError`] on a malformed body, an empty pool, or an allowance
/// or balance shortfall on either side.
#[utoipa::path(
    post,
    path = "/api/v1/swap/a-for-b",
    tag = "Swaps",
    summary = "Swap token A for token B",
    description = "Pulls amount_in of token A from the trader and sends the same amount of token B back. Requires a prior approval of the pool account on token A.",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "Swap executed", body = SwapResponse),
        (status = 400, description = "Malformed or zero amount", body = ErrorResponse),
        (status = 403, description = "Trader is the pool account", body = ErrorResponse),
        (status = 422, description = "Empty pool, insufficient allowance, or insufficient balance", body = ErrorResponse),
    )
)]
pub async fn swap_a_for_b(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> Result<impl IntoResponse, DexError> {
    execute(&state, SwapDirection::AForB, &req).await.map(Json)
}

/// `POST /swap/b-for-a`: Sell token B for token A at 1:1.
///
/// # Errors
///
/// Returns [`DexError`] on a malformed body, an empty pool, or an allowance
/// or balance shortfall on either side.
#[utoipa::path(
    post,
    path = "/api/v1/swap/b-for-a",
    tag = "Swaps",
    summary = "Swap token B for token A",
    description = "Pulls amount_in of token B from the trader and sends the same amount of token A back. Requires a prior approval of the pool account on token B.",
    request_body = SwapRequest,
    responses(
        (status = 200, description = "Swap executed", body = SwapResponse),
        (status = 400, description = "Malformed or zero amount", body = ErrorResponse),
        (status = 403, description = "Trader is the pool account", body = ErrorResponse),
        (status = 422, description = "Empty pool, insufficient allowance, or insufficient balance", body = ErrorResponse),
    )
)]
pub async fn swap_b_for_a(
    State(state): State<AppState>,
    Json(req): Json<SwapRequest>,
) -> Result<impl IntoResponse, DexError> {
    execute(&state, SwapDirection::BForA, &req).await.map(Json)
}

/// Swap routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/swap/a-for-b", post(swap_a_for_b))
        .route("/swap/b-for-a", post(swap_b_for_a))
}

async fn execute(
    state: &AppState,
    direction: SwapDirection,
    req: &SwapRequest,
) -> Result<SwapResponse, DexError> {
    let trader = parse_account("trader", &req.trader)?;
    let amount_in = parse_amount("amount_in", &req.amount_in)?;

    let receipt = state.dex_service.swap(&trader, direction, amount_in).await?;

    Ok(SwapResponse {
        swap_id: uuid::Uuid::new_v4().to_string(),
        trader: receipt.trader.to_string(),
        token_in: state.dex_service.symbol(direction.source()).await,
        token_out: state.dex_service.symbol(direction.destination()).await,
        amount_in: receipt.amount_in.to_string(),
        amount_out: receipt.amount_out.to_string(),
        reserve_a: receipt.reserves.reserve_a.to_string(),
        reserve_b: receipt.reserves.reserve_b.to_string(),
        executed_at: Utc::now(),
    })
}
