//! Asset ledger abstraction and its in-memory token implementation.
//!
//! The pool never stores balances itself. Every reserve it reports is a
//! live [`AssetLedger::balance_of`] query against the pool's own account,
//! and every movement of funds is a ledger transfer.
//!
//! # Ledger Invariants
//!
//! - Balances and allowances are unsigned; no operation drives them below
//!   zero.
//! - Transfers conserve total supply: only [`TokenLedger::mint`] changes it.
//! - A failed transfer leaves the ledger untouched.

use std::collections::HashMap;

use serde::Serialize;

use super::{AccountId, Amount};
use crate::error::LedgerError;

/// Fungible-asset ledger consumed by the pool, one instance per asset.
///
/// `approve` is part of the trait so that external parties (the manager,
/// traders) can grant allowances through the same handle; the pool itself
/// only calls it to restore an allowance consumed by a rolled-back leg.
pub trait AssetLedger: std::fmt::Debug + Send + Sync {
    /// Ticker symbol of the asset.
    fn symbol(&self) -> &str;

    /// Current balance of `account`. Unknown accounts hold zero.
    fn balance_of(&self, account: &AccountId) -> Amount;

    /// Remaining amount `spender` may move out of `owner`'s balance.
    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount;

    /// Sets the allowance of `spender` over `owner`'s balance to `amount`.
    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount);

    /// Moves `amount` from `from` to `to` on the authority of `from`.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientBalance`] if `from` holds less than
    ///   `amount`.
    /// - [`LedgerError::Overflow`] if the credit would overflow.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: Amount)
    -> Result<(), LedgerError>;

    /// Moves `amount` from `owner` to `recipient` on the authority of
    /// `spender`, consuming allowance.
    ///
    /// # Errors
    ///
    /// - [`LedgerError::InsufficientAllowance`] if the allowance of
    ///   `spender` over `owner` is below `amount`.
    /// - [`LedgerError::InsufficientBalance`] if `owner` holds less than
    ///   `amount`.
    /// - [`LedgerError::Overflow`] if the credit would overflow.
    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError>;
}

/// Token metadata exposed by the gateway.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TokenMetadata {
    /// Ticker symbol (e.g. `"TKA"`).
    pub symbol: String,
    /// Human-readable name.
    pub name: String,
    /// Number of decimal places.
    pub decimals: u8,
    /// Total minted supply.
    pub total_supply: Amount,
}

/// In-memory ERC-20 style ledger.
///
/// An allowance of [`Amount::MAX`] is treated as unlimited and is never
/// decremented by [`AssetLedger::transfer_from`].
#[derive(Debug, Clone)]
pub struct TokenLedger {
    symbol: String,
    name: String,
    decimals: u8,
    total_supply: Amount,
    balances: HashMap<AccountId, Amount>,
    allowances: HashMap<(AccountId, AccountId), Amount>,
}

impl TokenLedger {
    /// Creates an empty ledger with zero supply.
    #[must_use]
    pub fn new(symbol: impl Into<String>, name: impl Into<String>, decimals: u8) -> Self {
        Self {
            symbol: symbol.into(),
            name: name.into(),
            decimals,
            total_supply: 0,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    /// Creates a ledger and mints `initial_supply` to `holder`.
    ///
    /// # Errors
    ///
    /// Never fails in practice; returns [`LedgerError::Overflow`] only if
    /// the mint overflows, which cannot happen on an empty ledger.
    pub fn with_supply(
        symbol: impl Into<String>,
        name: impl Into<String>,
        decimals: u8,
        holder: &AccountId,
        initial_supply: Amount,
    ) -> Result<Self, LedgerError> {
        let mut ledger = Self::new(symbol, name, decimals);
        ledger.mint(holder, initial_supply)?;
        Ok(ledger)
    }

    /// Creates `amount` new units in `to`'s balance.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Overflow`] if the total supply or the
    /// recipient balance would overflow.
    pub fn mint(&mut self, to: &AccountId, amount: Amount) -> Result<(), LedgerError> {
        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        let balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.total_supply = total_supply;
        self.balances.insert(to.clone(), balance);
        Ok(())
    }

    /// Total minted supply.
    #[must_use]
    pub const fn total_supply(&self) -> Amount {
        self.total_supply
    }

    /// Snapshot of the token's metadata.
    #[must_use]
    pub fn metadata(&self) -> TokenMetadata {
        TokenMetadata {
            symbol: self.symbol.clone(),
            name: self.name.clone(),
            decimals: self.decimals,
            total_supply: self.total_supply,
        }
    }

    /// Applies a balance move after all checks have passed.
    fn move_balance(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let from_balance = self.balance_of(from);
        let debited = from_balance
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                account: from.clone(),
                available: from_balance,
                required: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert(from.clone(), debited);
        self.balances.insert(to.clone(), credited);
        Ok(())
    }
}

impl AssetLedger for TokenLedger {
    fn symbol(&self) -> &str {
        &self.symbol
    }

    fn balance_of(&self, account: &AccountId) -> Amount {
        self.balances.get(account).copied().unwrap_or(0)
    }

    fn allowance(&self, owner: &AccountId, spender: &AccountId) -> Amount {
        self.allowances
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    fn approve(&mut self, owner: &AccountId, spender: &AccountId, amount: Amount) {
        let key = (owner.clone(), spender.clone());
        if amount == 0 {
            self.allowances.remove(&key);
        } else {
            self.allowances.insert(key, amount);
        }
    }

    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &mut self,
        spender: &AccountId,
        owner: &AccountId,
        recipient: &AccountId,
        amount: Amount,
    ) -> Result<(), LedgerError> {
        let allowance = self.allowance(owner, spender);
        if allowance < amount {
            return Err(LedgerError::InsufficientAllowance {
                owner: owner.clone(),
                spender: spender.clone(),
                available: allowance,
                required: amount,
            });
        }
        self.move_balance(owner, recipient, amount)?;
        if allowance != Amount::MAX {
            self.approve(owner, spender, allowance - amount);
        }
        Ok(())
    }
}
