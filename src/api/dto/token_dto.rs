//! Token ledger DTOs: approvals, transfers, balance queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /tokens/{asset}/approve`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct ApproveRequest {
    /// Account granting the allowance.
    pub owner: String,
    /// Account allowed to spend. Defaults to the pool account.
    #[serde(default)]
    pub spender: Option<String>,
    /// New allowance (string-encoded u128). Replaces any previous value.
    pub amount: String,
}

/// Response body for `POST /tokens/{asset}/approve`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApproveResponse {
    /// Token symbol.
    pub token: String,
    /// Account granting the allowance.
    pub owner: String,
    /// Account allowed to spend.
    pub spender: String,
    /// Allowance now in effect (string-encoded).
    pub allowance: String,
}

/// Request body for `POST /tokens/{asset}/transfer`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct TransferRequest {
    /// Sending account.
    pub from: String,
    /// Receiving account.
    pub to: String,
    /// Amount to move (string-encoded u128).
    pub amount: String,
}

/// Response body for `POST /tokens/{asset}/transfer`.
#[derive(Debug, Serialize, ToSchema)]
pub struct TransferResponse {
    /// Token symbol.
    pub token: String,
    /// Sending account.
    pub from: String,
    /// Receiving account.
    pub to: String,
    /// Amount moved (string-encoded).
    pub amount: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}

/// Response body for `GET /tokens/{asset}/balances/{account}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct BalanceResponse {
    /// Token symbol.
    pub token: String,
    /// Queried account.
    pub account: String,
    /// Balance (string-encoded).
    pub balance: String,
}

/// Response body for `GET /tokens/{asset}/allowances/{owner}/{spender}`.
#[derive(Debug, Serialize, ToSchema)]
pub struct AllowanceResponse {
    /// Token symbol.
    pub token: String,
    /// Account that granted the allowance.
    pub owner: String,
    /// Account allowed to spend.
    pub spender: String,
    /// Remaining allowance (string-encoded).
    pub allowance: String,
}
