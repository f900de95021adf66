//! Pool state DTOs.

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::TokenMetadata;
use crate::service::PoolState;

/// Token metadata as exposed by `GET /pool`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TokenDto {
    /// Ticker symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Number of decimal places.
    pub decimals: u8,
    /// Total minted supply (string-encoded).
    pub total_supply: String,
}

impl From<TokenMetadata> for TokenDto {
    fn from(meta: TokenMetadata) -> Self {
        Self {
            symbol: meta.symbol,
            name: meta.name,
            decimals: meta.decimals,
            total_supply: meta.total_supply.to_string(),
        }
    }
}

/// Response body for `GET /pool`.
#[derive(Debug, Serialize, ToSchema)]
pub struct PoolStateResponse {
    /// Liquidity manager account.
    pub manager: String,
    /// Pool custody account.
    pub pool_account: String,
    /// Token A metadata.
    pub token_a: TokenDto,
    /// Token B metadata.
    pub token_b: TokenDto,
    /// Pool token A balance (string-encoded).
    pub reserve_a: String,
    /// Pool token B balance (string-encoded).
    pub reserve_b: String,
}

impl From<PoolState> for PoolStateResponse {
    fn from(state: PoolState) -> Self {
        Self {
            manager: state.manager.to_string(),
            pool_account: state.pool_account.to_string(),
            token_a: state.token_a.into(),
            token_b: state.token_b.into(),
            reserve_a: state.reserves.reserve_a.to_string(),
            reserve_b: state.reserves.reserve_b.to_string(),
        }
    }
}
