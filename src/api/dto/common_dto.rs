//! Shared request parsing helpers used across endpoints.

use crate::domain::{AccountId, Amount, Asset};
use crate::error::DexError;

/// Parses a string-encoded amount field.
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] naming `field` if `value` is not a
/// base-10 unsigned integer that fits in a `u128`.
pub fn parse_amount(field: &str, value: &str) -> Result<Amount, DexError> {
    value
        .trim()
        .parse()
        .map_err(|_| DexError::InvalidRequest(format!("invalid {field}: {value}")))
}

/// Parses an account address field.
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] naming `field` if `value` is blank.
pub fn parse_account(field: &str, value: &str) -> Result<AccountId, DexError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DexError::InvalidRequest(format!("missing {field}")));
    }
    Ok(AccountId::new(trimmed))
}

/// Parses the `{asset}` path segment (`a` or `b`).
///
/// # Errors
///
/// Returns [`DexError::InvalidRequest`] for any other value.
pub fn parse_asset(value: &str) -> Result<Asset, DexError> {
    value.parse().map_err(DexError::InvalidRequest)
}
