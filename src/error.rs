//! Error types for the pool core, the asset ledgers, and the gateway.
//!
//! [`DexError`] is the central error type. Each variant maps to a specific
//! HTTP status code and structured JSON error response. Ledger-level
//! failures are described by [`LedgerError`] and propagate unchanged inside
//! [`DexError::Ledger`].

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{AccountId, Amount, Asset};

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 4003,
///     "message": "no tokens in the liquidity pool"
///   }
/// }
/// ```
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Numeric error code.
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Failure reported by an asset ledger when a transfer cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// Spender's allowance over the owner's balance is too small.
    #[error(
        "insufficient allowance: {spender} may spend {available} of {owner}'s balance, {required} required"
    )]
    InsufficientAllowance {
        /// Account whose balance would be spent.
        owner: AccountId,
        /// Account attempting the spend.
        spender: AccountId,
        /// Allowance currently granted.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// Account does not hold enough of the asset.
    #[error("insufficient balance: {account} holds {available}, {required} required")]
    InsufficientBalance {
        /// Account being debited.
        account: AccountId,
        /// Current balance.
        available: Amount,
        /// Amount requested.
        required: Amount,
    },

    /// Crediting the amount would overflow a balance or the total supply.
    #[error("amount overflow")]
    Overflow,
}

/// Error returned by every pool and gateway operation.
///
/// # Error Code Ranges
///
/// | Range     | Category      | HTTP Status                  |
/// |-----------|---------------|------------------------------|
/// | 1000–1999 | Validation    | 400 Bad Request              |
/// | 2000–2999 | Authorization | 403 Forbidden                |
/// | 3000–3999 | Server        | 500 Internal Server Error    |
/// | 4000–4999 | Pool / Ledger | 422 Unprocessable Entity     |
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DexError {
    /// Caller may not perform the operation: a non-manager touching
    /// liquidity, or the pool's custody account acting as an external party.
    #[error("account {0} is not authorized for this operation")]
    Unauthorized(AccountId),

    /// Caller has not approved the pool to move enough of the asset.
    #[error("the pool is not allowed to transfer that amount of {0}")]
    InsufficientAllowance(Asset),

    /// Withdrawal exceeds what the pool holds of the asset.
    #[error("cannot remove more {0} than the pool holds")]
    InsufficientLiquidity(Asset),

    /// A swap was attempted while either reserve is zero.
    #[error("no tokens in the liquidity pool")]
    EmptyPool,

    /// Underlying ledger rejected a transfer.
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Request validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DexError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::Unauthorized(_) => 2001,
            Self::Internal(_) => 3000,
            Self::InsufficientAllowance(_) => 4001,
            Self::InsufficientLiquidity(_) => 4002,
            Self::EmptyPool => 4003,
            Self::Ledger(LedgerError::InsufficientAllowance { .. }) => 4004,
            Self::Ledger(LedgerError::InsufficientBalance { .. }) => 4005,
            Self::Ledger(LedgerError::Overflow) => 4006,
        }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::FORBIDDEN,
            Self::InsufficientAllowance(_)
            | Self::InsufficientLiquidity(_)
            | Self::EmptyPool
            | Self::Ledger(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for DexError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
