//! Token ledger handlers: approve, transfer, balance and allowance queries.
//!
//! These expose the two asset ledgers directly so that clients can fund
//! traders and grant the pool the allowances that liquidity deposits and
//! swaps consume.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::Utc;

use crate::api::dto::{
    AllowanceResponse, ApproveRequest, ApproveResponse, BalanceResponse, TransferRequest,
    TransferResponse, parse_account, parse_amount, parse_asset,
};
use crate::app_state::AppState;
use crate::error::{DexError, ErrorResponse};

/// `POST /tokens/{asset}/approve`: Set an allowance.
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] on an unknown asset or a malformed
/// body, and [`DexError::Unauthorized`] if `owner` is the pool account.
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{asset}/approve",
    tag = "Tokens",
    summary = "Approve a spender",
    description = "Replaces owner's allowance for spender. Omitting spender approves the pool account. The pool account itself cannot be the owner.",
    params(
        ("asset" = String, Path, description = "Token: `a` or `b`"),
    ),
    request_body = ApproveRequest,
    responses(
        (status = 200, description = "Allowance set", body = ApproveResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Owner is the pool account", body = ErrorResponse),
    )
)]
pub async fn approve(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Json(req): Json<ApproveRequest>,
) -> Result<impl IntoResponse, DexError> {
    let asset = parse_asset(&asset)?;
    let owner = parse_account("owner", &req.owner)?;
    let spender = req
        .spender
        .as_deref()
        .map(|s| parse_account("spender", s))
        .transpose()?;
    let amount = parse_amount("amount", &req.amount)?;

    let spender = state
        .dex_service
        .approve(asset, &owner, spender, amount)
        .await?;

    Ok(Json(ApproveResponse {
        token: state.dex_service.symbol(asset).await,
        owner: owner.to_string(),
        spender: spender.to_string(),
        allowance: amount.to_string(),
    }))
}

/// `POST /tokens/{asset}/transfer`: Move tokens between accounts.
///
/// # Errors
///
/// Returns [`DexError`] on an invalid request, if `from` is the pool
/// account, or if the sender's balance is too small.
#[utoipa::path(
    post,
    path = "/api/v1/tokens/{asset}/transfer",
    tag = "Tokens",
    summary = "Transfer tokens",
    description = "Moves amount of the token from `from` to `to`. The pool account cannot be the sender.",
    params(
        ("asset" = String, Path, description = "Token: `a` or `b`"),
    ),
    request_body = TransferRequest,
    responses(
        (status = 200, description = "Transfer executed", body = TransferResponse),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 403, description = "Sender is the pool account", body = ErrorResponse),
        (status = 422, description = "Insufficient balance", body = ErrorResponse),
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    Path(asset): Path<String>,
    Json(req): Json<TransferRequest>,
) -> Result<impl IntoResponse, DexError> {
    let asset = parse_asset(&asset)?;
    let from = parse_account("from", &req.from)?;
    let to = parse_account("to", &req.to)?;
    let amount = parse_amount("amount", &req.amount)?;

    state.dex_service.transfer(asset, &from, &to, amount).await?;

    Ok(Json(TransferResponse {
        token: state.dex_service.symbol(asset).await,
        from: from.to_string(),
        to: to.to_string(),
        amount: amount.to_string(),
        executed_at: Utc::now(),
    }))
}

/// `GET /tokens/{asset}/balances/{account}`: Account balance.
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] on an unknown asset.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{asset}/balances/{account}",
    tag = "Tokens",
    summary = "Get balance",
    params(
        ("asset" = String, Path, description = "Token: `a` or `b`"),
        ("account" = String, Path, description = "Account address"),
    ),
    responses(
        (status = 200, description = "Balance", body = BalanceResponse),
        (status = 400, description = "Unknown asset", body = ErrorResponse),
    )
)]
pub async fn balance(
    State(state): State<AppState>,
    Path((asset, account)): Path<(String, String)>,
) -> Result<impl IntoResponse, DexError> {
    let asset = parse_asset(&asset)?;
    let account = parse_account("account", &account)?;
    let balance = state.dex_service.balance_of(asset, &account).await;

    Ok(Json(BalanceResponse {
        token: state.dex_service.symbol(asset).await,
        account: account.to_string(),
        balance: balance.to_string(),
    }))
}

/// `GET /tokens/{asset}/allowances/{owner}/{spender}`: Remaining allowance.
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] on an unknown asset.
#[utoipa::path(
    get,
    path = "/api/v1/tokens/{asset}/allowances/{owner}/{spender}",
    tag = "Tokens",
    summary = "Get allowance",
    params(
        ("asset" = String, Path, description = "Token: `a` or `b`"),
        ("owner" = String, Path, description = "Account that granted the allowance"),
        ("spender" = String, Path, description = "Account allowed to spend"),
    ),
    responses(
        (status = 200, description = "Allowance", body = AllowanceResponse),
        (status = 400, description = "Unknown asset", body = ErrorResponse),
    )
)]
pub async fn allowance(
    State(state): State<AppState>,
    Path((asset, owner, spender)): Path<(String, String, String)>,
) -> Result<impl IntoResponse, DexError> {
    let asset = parse_asset(&asset)?;
    let owner = parse_account("owner", &owner)?;
    let spender = parse_account("spender", &spender)?;
    let allowance = state.dex_service.allowance(asset, &owner, &spender).await;

    Ok(Json(AllowanceResponse {
        token: state.dex_service.symbol(asset).await,
        owner: owner.to_string(),
        spender: spender.to_string(),
        allowance: allowance.to_string(),
    }))
}

/// Token ledger routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tokens/{asset}/approve", post(approve))
        .route("/tokens/{asset}/transfer", post(transfer))
        .route("/tokens/{asset}/balances/{account}", get(balance))
        .route(
            "/tokens/{asset}/allowances/{owner}/{spender}",
            get(allowance),
        )
}
