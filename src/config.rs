//! Service configuration loaded from environment variables.
//!
//! Follows 12-factor style: all settings come from environment variables
//! (or a `.env` file via `dotenvy`).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;

use crate::domain::{AccountId, Amount};

/// Default genesis supply per token: 100 000 whole tokens at 18 decimals.
pub const DEFAULT_INITIAL_SUPPLY: Amount = 100_000 * 10u128.pow(18);

/// Settings for one of the two tokens minted at genesis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenConfig {
    /// Ticker symbol.
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`DexConfig::from_env`].
#[derive(Debug, Clone)]
pub struct DexConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:3000`).
    pub listen_addr: SocketAddr,

    /// Capacity of the EventBus broadcast channel.
    pub event_bus_capacity: usize,

    /// Per-request timeout applied by the HTTP stack.
    pub request_timeout: Duration,

    /// Account that owns the pool and receives the genesis supply.
    pub manager: AccountId,

    /// The pool's own custody account on both ledgers.
    pub pool_account: AccountId,

    /// Token A metadata.
    pub token_a: TokenConfig,

    /// Token B metadata.
    pub token_b: TokenConfig,

    /// Decimal places shared by both tokens.
    pub token_decimals: u8,

    /// Amount of each token minted to the manager at genesis.
    pub initial_supply: Amount,
}

impl DexConfig {
    /// Loads configuration from environment variables.
    ///
    /// Falls back to sensible defaults when a variable is not set.
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`], or if the manager and pool accounts are equal.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let listen_addr: SocketAddr = std::env::var("LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
            .parse()
            .context("LISTEN_ADDR is not a valid socket address")?;

        let event_bus_capacity = parse_env("EVENT_BUS_CAPACITY", 10_000);
        let request_timeout = Duration::from_secs(parse_env("REQUEST_TIMEOUT_SECS", 30));

        let manager = AccountId::new(env_or(
            "DEX_MANAGER_ACCOUNT",
            "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266",
        ));
        let pool_account = AccountId::new(env_or(
            "DEX_POOL_ACCOUNT",
            "0x5fbdb2315678afecb367f032d93f642f64180aa3",
        ));
        anyhow::ensure!(
            manager != pool_account,
            "DEX_MANAGER_ACCOUNT and DEX_POOL_ACCOUNT must differ"
        );

        let token_a = TokenConfig {
            symbol: env_or("TOKEN_A_SYMBOL", "TKA"),
            name: env_or("TOKEN_A_NAME", "Token A"),
        };
        let token_b = TokenConfig {
            symbol: env_or("TOKEN_B_SYMBOL", "TKB"),
            name: env_or("TOKEN_B_NAME", "Token B"),
        };

        let token_decimals = parse_env("TOKEN_DECIMALS", 18);
        let initial_supply = parse_env("TOKEN_INITIAL_SUPPLY", DEFAULT_INITIAL_SUPPLY);

        Ok(Self {
            listen_addr,
            event_bus_capacity,
            request_timeout,
            manager,
            pool_account,
            token_a,
            token_b,
            token_decimals,
            initial_supply,
        })
    }
}

/// Reads an environment variable as a string, returning `default` when
/// missing.
fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parses an environment variable as `T`, returning `default` on missing
/// or invalid values.
fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
