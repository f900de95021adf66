//! Swap DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Request body for `POST /swap/a-for-b` and `POST /swap/b-for-a`.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SwapRequest {
    /// Trading account.
    pub trader: String,
    /// Exact input amount of the source token (string-encoded u128).
    pub amount_in: String,
}

/// Response body for swap endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct SwapResponse {
    /// Unique swap identifier.
    pub swap_id: String,
    /// Trading account.
    pub trader: String,
    /// Symbol of the token sold.
    pub token_in: String,
    /// Symbol of the token bought.
    pub token_out: String,
    /// Input amount (string-encoded).
    pub amount_in: String,
    /// Output amount (string-encoded).
    pub amount_out: String,
    /// Pool token A balance after the swap.
    pub reserve_a: String,
    /// Pool token B balance after the swap.
    pub reserve_b: String,
    /// Execution timestamp.
    pub executed_at: DateTime<Utc>,
}
