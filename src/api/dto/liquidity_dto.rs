//! Liquidity operation DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /liquidity/add` and `POST /liquidity/remove`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct LiquidityRequest {
    /// Calling account; must be the pool manager.
    pub caller: String,
    /// Amount of token A (string-encoded u128).
    pub amount_a: String,
    /// Amount of token B (string-encoded u128).
    pub amount_b: String,
}

/// Response body for liquidity operations.
#[derive(Debug, Serialize, ToSchema)]
pub struct LiquidityResponse {
    /// Manager account that supplied or received the tokens.
    pub manager: String,
    /// Token A moved (string-encoded).
    pub amount_a: String,
    /// Token B moved (string-encoded).
    pub amount_b: String,
    /// Pool token A balance after the operation.
    pub reserve_a: String,
    /// Pool token B balance after the operation.
    pub reserve_b: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}
