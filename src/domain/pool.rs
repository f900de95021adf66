//! The two-asset liquidity pool: authorization, pricing, and transfer
//! orchestration over two external asset ledgers.
//!
//! # Reserve Accounting
//!
//! The pool stores no reserves. Every reserve figure is a live
//! [`AssetLedger::balance_of`] query for the pool's own account, so the
//! ledgers are the single source of truth.
//!
//! # Atomicity
//!
//! Each mutating operation takes `&mut self`, runs every precondition
//! before touching a ledger, and moves funds through one [`Settlement`].
//! A failed call leaves balances, allowances, and the event stream
//! unchanged.
//!
//! # Pricing
//!
//! Swaps pay out exactly what they take in: `amount_out == amount_in`.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;

use super::{AccountId, Amount, Asset, AssetLedger, DexEvent, EventSink, Settlement, SwapDirection};
use crate::error::DexError;

/// Live reserves of the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Reserves {
    /// Pool balance of token A.
    pub reserve_a: Amount,
    /// Pool balance of token B.
    pub reserve_b: Amount,
}

impl Reserves {
    /// Returns `true` if either side is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.reserve_a == 0 || self.reserve_b == 0
    }
}

/// Outcome of a successful swap.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwapReceipt {
    /// Account that traded.
    pub trader: AccountId,
    /// Swap direction.
    pub direction: SwapDirection,
    /// Source asset pulled from the trader.
    pub amount_in: Amount,
    /// Destination asset paid to the trader.
    pub amount_out: Amount,
    /// Pool reserves after the swap.
    pub reserves: Reserves,
}

/// Two-asset pool with a single liquidity manager.
///
/// `manager` and `account` are fixed at construction; so are the two
/// ledgers. External parties approve or move their own funds through
/// [`Pool::approve`] and [`Pool::transfer`]; the custody account can only
/// be debited by [`Pool::remove_liquidity`] and swaps.
#[derive(Debug)]
pub struct Pool<L> {
    manager: AccountId,
    account: AccountId,
    asset_a: L,
    asset_b: L,
    events: Arc<dyn EventSink>,
}

impl<L: AssetLedger> Pool<L> {
    /// Creates a pool custodied by `account` and managed by `manager`.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::InvalidRequest`] if `manager` and `account` are
    /// the same account.
    pub fn new(
        manager: AccountId,
        account: AccountId,
        asset_a: L,
        asset_b: L,
        events: Arc<dyn EventSink>,
    ) -> Result<Self, DexError> {
        if manager == account {
            return Err(DexError::InvalidRequest(
                "manager and pool account must differ".to_string(),
            ));
        }
        Ok(Self {
            manager,
            account,
            asset_a,
            asset_b,
            events,
        })
    }

    /// The only account allowed to add or remove liquidity.
    #[must_use]
    pub const fn manager(&self) -> &AccountId {
        &self.manager
    }

    /// The pool's own custody account on both ledgers.
    #[must_use]
    pub const fn account(&self) -> &AccountId {
        &self.account
    }

    /// Read access to one asset's ledger.
    #[must_use]
    pub const fn ledger(&self, asset: Asset) -> &L {
        match asset {
            Asset::A => &self.asset_a,
            Asset::B => &self.asset_b,
        }
    }

    fn ledger_mut(&mut self, asset: Asset) -> &mut L {
        match asset {
            Asset::A => &mut self.asset_a,
            Asset::B => &mut self.asset_b,
        }
    }

    /// Sets `owner`'s allowance for `spender` on one ledger.
    ///
    /// # Errors
    ///
    /// Returns [`DexError::Unauthorized`] if `owner` is the pool account.
    pub fn approve(
        &mut self,
        asset: Asset,
        owner: &AccountId,
        spender: &AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.ensure_not_custody(owner)?;
        self.ledger_mut(asset).approve(owner, spender, amount);
        Ok(())
    }

    /// Moves `from`'s own tokens to `to` on one ledger.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `from` is the pool account.
    /// - [`DexError::Ledger`] if `from` cannot cover the transfer.
    pub fn transfer(
        &mut self,
        asset: Asset,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        self.ensure_not_custody(from)?;
        self.ledger_mut(asset).transfer(from, to, amount)?;
        Ok(())
    }

    /// Current reserves, read live from both ledgers.
    #[must_use]
    pub fn reserves(&self) -> Reserves {
        Reserves {
            reserve_a: self.asset_a.balance_of(&self.account),
            reserve_b: self.asset_b.balance_of(&self.account),
        }
    }

    fn ensure_manager(&self, caller: &AccountId) -> Result<(), DexError> {
        if *caller == self.manager {
            Ok(())
        } else {
            Err(DexError::Unauthorized(caller.clone()))
        }
    }

    /// Custody funds leave the pool only through liquidity removal and
    /// swap payouts.
    fn ensure_not_custody(&self, caller: &AccountId) -> Result<(), DexError> {
        if *caller == self.account {
            Err(DexError::Unauthorized(caller.clone()))
        } else {
            Ok(())
        }
    }

    /// Pulls `amount_a` of token A and `amount_b` of token B from the
    /// manager into the pool.
    ///
    /// The manager must have approved the pool on both ledgers beforehand.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the manager.
    /// - [`DexError::InsufficientAllowance`] naming the first asset whose
    ///   allowance is too small (A is checked before B).
    /// - [`DexError::Ledger`] if the manager's balance cannot cover a leg.
    pub fn add_liquidity(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Reserves, DexError> {
        self.ensure_manager(caller)?;

        Settlement::new(&self.account)
            .pull(Asset::A, &self.manager, amount_a)
            .pull(Asset::B, &self.manager, amount_b)
            .execute(&mut self.asset_a, &mut self.asset_b)?;

        self.events.emit(DexEvent::LiquidityAdded {
            manager: self.manager.clone(),
            amount_a,
            amount_b,
            timestamp: Utc::now(),
        });
        Ok(self.reserves())
    }

    /// Sends `amount_a` of token A and `amount_b` of token B from the pool
    /// to the manager.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `caller` is not the manager.
    /// - [`DexError::InsufficientLiquidity`] for token A if `amount_a`
    ///   exceeds the A reserve, otherwise for token B if `amount_b`
    ///   exceeds the B reserve.
    /// - [`DexError::Ledger`] if a ledger rejects a transfer.
    pub fn remove_liquidity(
        &mut self,
        caller: &AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Reserves, DexError> {
        self.ensure_manager(caller)?;

        let reserves = self.reserves();
        if amount_a > reserves.reserve_a {
            return Err(DexError::InsufficientLiquidity(Asset::A));
        }
        if amount_b > reserves.reserve_b {
            return Err(DexError::InsufficientLiquidity(Asset::B));
        }

        Settlement::new(&self.account)
            .push(Asset::A, &self.manager, amount_a)
            .push(Asset::B, &self.manager, amount_b)
            .execute(&mut self.asset_a, &mut self.asset_b)?;

        self.events.emit(DexEvent::LiquidityRemoved {
            manager: self.manager.clone(),
            amount_a,
            amount_b,
            timestamp: Utc::now(),
        });
        Ok(self.reserves())
    }

    /// Sells `amount_in` of token A for the same amount of token B.
    ///
    /// # Errors
    ///
    /// See [`Pool::swap`].
    pub fn swap_a_for_b(
        &mut self,
        trader: &AccountId,
        amount_in: Amount,
    ) -> Result<SwapReceipt, DexError> {
        self.swap(trader, SwapDirection::AForB, amount_in)
    }

    /// Sells `amount_in` of token B for the same amount of token A.
    ///
    /// # Errors
    ///
    /// See [`Pool::swap`].
    pub fn swap_b_for_a(
        &mut self,
        trader: &AccountId,
        amount_in: Amount,
    ) -> Result<SwapReceipt, DexError> {
        self.swap(trader, SwapDirection::BForA, amount_in)
    }

    /// Pulls `amount_in` of the source asset from `trader` and pays out the
    /// same amount of the destination asset. Open to any caller.
    ///
    /// # Errors
    ///
    /// - [`DexError::Unauthorized`] if `trader` is the pool account.
    /// - [`DexError::InvalidRequest`] if `amount_in` is zero.
    /// - [`DexError::EmptyPool`] if either reserve is zero, regardless of
    ///   the trader's allowance.
    /// - [`DexError::InsufficientAllowance`] if the trader approved less
    ///   than `amount_in` of the source asset.
    /// - [`DexError::Ledger`] if the trader's balance or the destination
    ///   reserve cannot cover its leg.
    pub fn swap(
        &mut self,
        trader: &AccountId,
        direction: SwapDirection,
        amount_in: Amount,
    ) -> Result<SwapReceipt, DexError> {
        self.ensure_not_custody(trader)?;
        if amount_in == 0 {
            return Err(DexError::InvalidRequest(
                "swap amount must be positive".to_string(),
            ));
        }
        if self.reserves().is_empty() {
            return Err(DexError::EmptyPool);
        }

        let amount_out = amount_in;
        Settlement::new(&self.account)
            .pull(direction.source(), trader, amount_in)
            .push(direction.destination(), trader, amount_out)
            .execute(&mut self.asset_a, &mut self.asset_b)?;

        let timestamp = Utc::now();
        self.events.emit(match direction {
            SwapDirection::AForB => DexEvent::SwappedAForB {
                trader: trader.clone(),
                amount_in,
                amount_out,
                timestamp,
            },
            SwapDirection::BForA => DexEvent::SwappedBForA {
                trader: trader.clone(),
                amount_in,
                amount_out,
                timestamp,
            },
        });

        Ok(SwapReceipt {
            trader: trader.clone(),
            direction,
            amount_in,
            amount_out,
            reserves: self.reserves(),
        })
    }
}
