//! Dex service: serializes pool operations and exposes ledger access.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::RwLock;

use crate::config::DexConfig;
use crate::domain::{
    AccountId, Amount, Asset, AssetLedger, EventBus, Pool, Reserves, SwapDirection, SwapReceipt,
    TokenLedger, TokenMetadata,
};
use crate::error::DexError;

/// Snapshot of the pool's configuration and live reserves.
#[derive(Debug, Clone, Serialize)]
pub struct PoolState {
    /// Liquidity manager.
    pub manager: AccountId,
    /// Pool custody account.
    pub pool_account: AccountId,
    /// Token A metadata.
    pub token_a: TokenMetadata,
    /// Token B metadata.
    pub token_b: TokenMetadata,
    /// Live reserves.
    pub reserves: Reserves,
}

/// Orchestration layer for all pool and ledger operations.
///
/// Holds the single [`Pool`] behind a [`RwLock`]: every mutation takes the
/// write lock for its whole duration, so operations never interleave.
/// Events are emitted by the pool itself through the [`EventBus`] it was
/// built with.
#[derive(Debug, Clone)]
pub struct DexService {
    pool: Arc<RwLock<Pool<TokenLedger>>>,
    event_bus: EventBus,
}

impl DexService {
    /// Creates a service around an existing pool.
    #[must_use]
    pub fn new(pool: Pool<TokenLedger>, event_bus: EventBus) -> Self {
        Self {
            pool: Arc::new(RwLock::new(pool)),
            event_bus,
        }
    }

    /// Builds both token ledgers from `config`, mints the genesis supply to
    /// the manager, and wires a fresh pool to `event_bus`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Ledger`] if the genesis mint overflows.
    /// - [`DexError::InvalidRequest`] if the manager is the pool account.
    pub fn from_config(config: &DexConfig, event_bus: EventBus) -> Result<Self, DexError> {
        let token_a = TokenLedger::with_supply(
            config.token_a.symbol.clone(),
            config.token_a.name.clone(),
            config.token_decimals,
            &config.manager,
            config.initial_supply,
        )?;
        let token_b = TokenLedger::with_supply(
            config.token_b.symbol.clone(),
            config.token_b.name.clone(),
            config.token_decimals,
            &config.manager,
            config.initial_supply,
        )?;

        let pool = Pool::new(
            config.manager.clone(),
            config.pool_account.clone(),
            token_a,
            token_b,
            Arc::new(event_bus.clone()),
        )?;

        tracing::info!(
            manager = %config.manager,
            pool_account = %config.pool_account,
            supply = %config.initial_supply,
            "pool deployed"
        );
        Ok(Self::new(pool, event_bus))
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Returns the pool's configuration and live reserves.
    pub async fn pool_state(&self) -> PoolState {
        let pool = self.pool.read().await;
        PoolState {
            manager: pool.manager().clone(),
            pool_account: pool.account().clone(),
            token_a: pool.ledger(Asset::A).metadata(),
            token_b: pool.ledger(Asset::B).metadata(),
            reserves: pool.reserves(),
        }
    }

    /// Deposits liquidity on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Propagates every [`DexError`] from [`Pool::add_liquidity`].
    pub async fn add_liquidity(
        &self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Reserves, DexError> {
        let mut pool = self.pool.write().await;
        let result = pool.add_liquidity(caller, amount_a, amount_b);
        drop(pool);

        match &result {
            Ok(reserves) => tracing::info!(
                %caller,
                %amount_a,
                %amount_b,
                reserve_a = %reserves.reserve_a,
                reserve_b = %reserves.reserve_b,
                "liquidity added"
            ),
            Err(err) => tracing::debug!(%caller, error = %err, "add_liquidity rejected"),
        }
        result
    }

    /// Withdraws liquidity on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Propagates every [`DexError`] from [`Pool::remove_liquidity`].
    pub async fn remove_liquidity(
        &self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Reserves, DexError> {
        let mut pool = self.pool.write().await;
        let result = pool.remove_liquidity(caller, amount_a, amount_b);
        drop(pool);

        match &result {
            Ok(reserves) => tracing::info!(
                %caller,
                %amount_a,
                %amount_b,
                reserve_a = %reserves.reserve_a,
                reserve_b = %reserves.reserve_b,
                "liquidity removed"
            ),
            Err(err) => tracing::debug!(%caller, error = %err, "remove_liquidity rejected"),
        }
        result
    }

    /// Executes a swap for `trader`.
    ///
    /// # Errors
    ///
    /// Propagates every [`DexError`] from [`Pool::swap`].
    pub async fn swap(
        &self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapReceipt, DexError> {
        let mut pool = self.pool.write().await;
        let result = pool.swap(trader, direction, amount_in);
        drop(pool);

        match &result {
            Ok(receipt) => tracing::info!(
                %trader,
                ?direction,
                amount_in = %receipt.amount_in,
                amount_out = %receipt.amount_out,
                "swap executed"
            ),
            Err(err) => tracing::debug!(%trader, ?direction, error = %err, "swap rejected"),
        }
        result
    }

    /// Sets `owner`'s allowance for `spender` on one ledger. When `spender`
    /// is `None` the pool account is approved.
    ///
    /// Returns the spender that was approved.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Unauthorized`] if `owner` is the pool account.
    pub async fn approve(
        &self,
        asset: Asset,
        owner: &AccountId,
        spender: Option<AccountId>,
        amount: Amount,
    ) -> Result<AccountId, DexError> {
        let mut pool = self.pool.write().await;
        let spender = spender.unwrap_or_else(|| pool.account().clone());
        let result = pool.approve(asset, owner, &spender, amount);
        drop(pool);

        match result {
            Ok(()) => {
                tracing::info!(%asset, %owner, %spender, %amount, "allowance set");
                Ok(spender)
            }
            Err(err) => {
                tracing::warn!(%asset, %owner, %spender, error = %err, "approve rejected");
                Err(err)
            }
        }
    }

    /// Moves `from`'s own tokens to `to`.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `from` is the pool account.
    /// - [`DexError::Ledger`] if `from` cannot cover the transfer.
    pub async fn transfer(
        &self,
        asset: Asset,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let mut pool = self.pool.write().await;
        let result = pool.transfer(asset, from, to, amount);
        drop(pool);

        match &result {
            Ok(()) => tracing::info!(%asset, %from, %to, %amount, "tokens transferred"),
            Err(err) => tracing::warn!(%asset, %from, %to, error = %err, "transfer rejected"),
        }
        result
    }

    /// Ticker symbol of one ledger's token.
    pub async fn symbol(&self, asset: Asset) -> String {
        self.pool.read().await.ledger(asset).symbol().to_string()
    }

    /// Balance of `account` on one ledger.
    pub async fn balance_of(&self, asset: Asset, account: &AccountId) -> Amount {
        self.pool.read().await.ledger(asset).balance_of(account)
    }

    /// Allowance of `spender` over `owner`'s balance on one ledger.
    pub async fn allowance(&self, asset: Asset, owner: &AccountId, spender: &AccountId) -> Amount {
        self.pool.read().await.ledger(asset).allowance(owner, spender)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::time::Duration;

    use crate::config::{DEFAULT_INITIAL_SUPPLY, TokenConfig};

    fn config() -> DexConfig {
        DexConfig {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            event_bus_capacity: 100,
            request_timeout: Duration::from_secs(5),
            manager: AccountId::new("0xowner"),
            pool_account: AccountId::new("0xpool"),
            token_a: TokenConfig {
                symbol: "TKA".to_string(),
                name: "Token A".to_string(),
            },
            token_b: TokenConfig {
                symbol: "TKB".to_string(),
                name: "Token B".to_string(),
            },
            token_decimals: 18,
            initial_supply: DEFAULT_INITIAL_SUPPLY,
        }
    }

    fn make_service() -> DexService {
        let Ok(service) = DexService::from_config(&config(), EventBus::new(100)) else {
            panic!("genesis failed");
        };
        service
    }

    #[tokio::test]
    async fn genesis_mints_to_manager() {
        let service = make_service();
        let manager = AccountId::new("0xowner");
        assert_eq!(
            service.balance_of(Asset::A, &manager).await,
            DEFAULT_INITIAL_SUPPLY
        );
        assert_eq!(
            service.balance_of(Asset::B, &manager).await,
            DEFAULT_INITIAL_SUPPLY
        );

        let state = service.pool_state().await;
        assert_eq!(state.token_a.symbol, "TKA");
        assert_eq!(state.token_b.name, "Token B");
        assert!(state.reserves.is_empty());
        assert_eq!(service.symbol(Asset::B).await, "TKB");
    }

    #[tokio::test]
    async fn approve_defaults_to_pool_account() {
        let service = make_service();
        let owner = AccountId::new("0xowner");
        let Ok(spender) = service.approve(Asset::A, &owner, None, 1_000).await else {
            panic!("approve failed");
        };
        assert_eq!(spender, AccountId::new("0xpool"));
        assert_eq!(service.allowance(Asset::A, &owner, &spender).await, 1_000);
    }

    #[tokio::test]
    async fn liquidity_and_swap_emit_events() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();
        let owner = AccountId::new("0xowner");

        assert!(service.approve(Asset::A, &owner, None, 2_000).await.is_ok());
        assert!(service.approve(Asset::B, &owner, None, 1_000).await.is_ok());

        let Ok(reserves) = service.add_liquidity(&owner, 1_000, 1_000).await else {
            panic!("add_liquidity failed");
        };
        assert_eq!(reserves.reserve_a, 1_000);

        let Ok(receipt) = service.swap(&owner, SwapDirection::AForB, 1_000).await else {
            panic!("swap failed");
        };
        assert_eq!(receipt.reserves.reserve_a, 2_000);
        assert_eq!(receipt.reserves.reserve_b, 0);

        let Ok(first) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(first.event_type_str(), "liquidity_added");
        let Ok(second) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(second.event_type_str(), "swapped_a_for_b");
    }

    #[tokio::test]
    async fn transfer_funds_a_trader() {
        let service = make_service();
        let owner = AccountId::new("0xowner");
        let trader = AccountId::new("0xtrader");

        let result = service.transfer(Asset::B, &owner, &trader, 50).await;
        assert!(result.is_ok());
        assert_eq!(service.balance_of(Asset::B, &trader).await, 50);

        let overdraft = service.transfer(Asset::B, &trader, &owner, 51).await;
        assert!(matches!(overdraft, Err(DexError::Ledger(_))));
    }

    #[tokio::test]
    async fn unauthorized_remove_is_surfaced() {
        let service = make_service();
        let intruder = AccountId::new("0xintruder");
        let result = service.remove_liquidity(&intruder, 1, 1).await;
        assert_eq!(result, Err(DexError::Unauthorized(intruder)));
    }

    #[tokio::test]
    async fn pool_account_cannot_move_or_lend_reserves() {
        let service = make_service();
        let owner = AccountId::new("0xowner");
        let pool = AccountId::new("0xpool");
        let thief = AccountId::new("0xthief");

        assert!(service.approve(Asset::A, &owner, None, 1_000).await.is_ok());
        assert!(service.approve(Asset::B, &owner, None, 1_000).await.is_ok());
        assert!(service.add_liquidity(&owner, 1_000, 1_000).await.is_ok());

        let drained = service.transfer(Asset::A, &pool, &thief, 1_000).await;
        assert_eq!(drained, Err(DexError::Unauthorized(pool.clone())));

        let lent = service
            .approve(Asset::B, &pool, Some(thief.clone()), 1_000)
            .await;
        assert_eq!(lent, Err(DexError::Unauthorized(pool.clone())));

        let state = service.pool_state().await;
        assert_eq!(state.reserves.reserve_a, 1_000);
        assert_eq!(state.reserves.reserve_b, 1_000);
        assert_eq!(service.balance_of(Asset::A, &thief).await, 0);
        assert_eq!(service.allowance(Asset::B, &pool, &thief).await, 0);
    }

    #[test]
    fn from_config_rejects_manager_as_pool_account() {
        let mut config = config();
        config.pool_account = config.manager.clone();
        assert!(matches!(
            DexService::from_config(&config, EventBus::new(1)),
            Err(DexError::InvalidRequest(_))
        ));
    }
}
