//! Liquidity operation handlers: add and remove.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{LiquidityRequest, LiquidityResponse, parse_account, parse_amount};
use crate::app_state::AppState;
use crate::domain::{AccountId, Amount, Reserves};
use crate::error::{DexError, ErrorResponse};

/// `POST /liquidity/add`: Deposit both tokens into the pool.
///
/// # Errors
///
/// Returns [`DexError`] if the caller is not the manager, an allowance or
/// balance is too small, or the body is malformed.
#[utoipa::path(
    post,
    path = "/api/v1/liquidity/add",
    tag = "Liquidity",
    summary = "Add liquidity",
    description = "Pulls amount_a of token A and amount_b of token B from the manager into the pool. Both transfers happen or neither does.",
    request_body = LiquidityRequest,
    responses(
        (status = 200, description = "Liquidity added", body = LiquidityResponse),
        (status = 400, description = "Malformed amount or account", body = ErrorResponse),
        (status = 403, description = "Caller is not the manager", body = ErrorResponse),
        (status = 422, description = "Insufficient allowance or balance", body = ErrorResponse),
    )
)]
pub async fn add_liquidity(
    State(state): State<AppState>,
    Json(req): Json<LiquidityRequest>,
) -> Result<impl IntoResponse, DexError> {
    let (caller, amount_a, amount_b) = parse_request(&req)?;
    let reserves = state
        .dex_service
        .add_liquidity(&caller, amount_a, amount_b)
        .await?;
    Ok(Json(respond(&caller, amount_a, amount_b, reserves)))
}

/// `POST /liquidity/remove`: Withdraw both tokens to the manager.
///
/// # Errors
///
/// Returns [`DexError`] if the caller is not the manager, the pool holds
/// too little of either token, or the body is malformed.
#[utoipa::path(
    post,
    path = "/api/v1/liquidity/remove",
    tag = "Liquidity",
    summary = "Remove liquidity",
    description = "Sends amount_a of token A and amount_b of token B from the pool to the manager. Both transfers happen or neither does.",
    request_body = LiquidityRequest,
    responses(
        (status = 200, description = "Liquidity removed", body = LiquidityResponse),
        (status = 400, description = "Malformed amount or account", body = ErrorResponse),
        (status = 403, description = "Caller is not the manager", body = ErrorResponse),
        (status = 422, description = "Insufficient pool liquidity", body = ErrorResponse),
    )
)]
pub async fn remove_liquidity(
    State(state): State<AppState>,
    Json(req): Json<LiquidityRequest>,
) -> Result<impl IntoResponse, DexError> {
    let (caller, amount_a, amount_b) = parse_request(&req)?;
    let reserves = state
        .dex_service
        .remove_liquidity(&caller, amount_a, amount_b)
        .await?;
    Ok(Json(respond(&caller, amount_a, amount_b, reserves)))
}

/// Liquidity routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/liquidity/add", post(add_liquidity))
        .route("/liquidity/remove", post(remove_liquidity))
}

fn parse_request(req: &LiquidityRequest) -> Result<(AccountId, Amount, Amount), DexError> {
    Ok((
        parse_account("caller", &req.caller)?,
        parse_amount("amount_a", &req.amount_a)?,
        parse_amount("amount_b", &req.amount_b)?,
    ))
}

fn respond(
    caller: &AccountId,
    amount_a: Amount,
    amount_b: Amount,
    reserves: Reserves,
) -> LiquidityResponse {
    LiquidityResponse {
        manager: caller.to_string(),
        amount_a: amount_a.to_string(),
        amount_b: amount_b.to_string(),
        reserve_a: reserves.reserve_a.to_string(),
        reserve_b: reserves.reserve_b.to_string(),
        executed_at: Utc::now(),
    }
}
