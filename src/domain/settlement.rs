//! All-or-nothing execution of the ledger transfers behind one pool
//! operation.
//!
//! A [`Settlement`] is an ordered list of [`Leg`]s. Execution happens in two
//! phases:
//!
//! 1. **Validate**: every leg is checked against a projection of live
//!    ledger state (balances and allowances, including the effect of the
//!    earlier legs of the same settlement). Nothing is mutated.
//! 2. **Apply**: legs are executed in order. If a ledger still rejects a
//!    leg, the legs already applied are reversed in reverse order and any
//!    allowance they consumed is restored, so the operation is inert.

use std::collections::HashMap;

use super::{AccountId, Amount, Asset, AssetLedger};
use crate::error::{DexError, LedgerError};

/// One transfer between the pool's account and an external account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Leg {
    /// Pull `amount` of `asset` from `owner` into the pool through
    /// `transfer_from`, spending the allowance `owner` granted the pool.
    Pull {
        /// Asset moved.
        asset: Asset,
        /// Account debited.
        owner: AccountId,
        /// Amount moved.
        amount: Amount,
    },
    /// Push `amount` of `asset` from the pool to `recipient`.
    Push {
        /// Asset moved.
        asset: Asset,
        /// Account credited.
        recipient: AccountId,
        /// Amount moved.
        amount: Amount,
    },
}

/// Ordered set of transfers applied as a single unit of work.
#[derive(Debug)]
pub struct Settlement<'a> {
    pool_account: &'a AccountId,
    legs: Vec<Leg>,
}

/// A leg that has been applied, with what is needed to reverse it.
#[derive(Debug)]
struct Applied {
    leg: Leg,
    allowance_before: Amount,
}

impl<'a> Settlement<'a> {
    /// Starts an empty settlement against the pool's custody account.
    #[must_use]
    pub fn new(pool_account: &'a AccountId) -> Self {
        Self {
            pool_account,
            legs: Vec::with_capacity(2),
        }
    }

    /// Appends a pull leg.
    #[must_use]
    pub fn pull(mut self, asset: Asset, owner: &AccountId, amount: Amount) -> Self {
        self.legs.push(Leg::Pull {
            asset,
            owner: owner.clone(),
            amount,
        });
        self
    }

    /// Appends a push leg.
    #[must_use]
    pub fn push(mut self, asset: Asset, recipient: &AccountId, amount: Amount) -> Self {
        self.legs.push(Leg::Push {
            asset,
            recipient: recipient.clone(),
            amount,
        });
        self
    }

    #[cfg(test)]
    fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Checks every leg against live ledger state without mutating it.
    ///
    /// # Errors
    ///
    /// - [`DexError::InsufficientAllowance`] if a pull exceeds the allowance
    ///   its owner granted the pool.
    /// - [`DexError::Ledger`] with [`LedgerError::InsufficientBalance`] if a
    ///   debited account cannot cover its leg.
    /// - [`DexError::Ledger`] with [`LedgerError::Overflow`] if a credit
    ///   would overflow.
    pub fn validate<L: AssetLedger>(&self, ledger_a: &L, ledger_b: &L) -> Result<(), DexError> {
        let mut projection = Projection::new(ledger_a, ledger_b, self.pool_account);
        for leg in &self.legs {
            match leg {
                Leg::Pull {
                    asset,
                    owner,
                    amount,
                } => {
                    projection.spend_allowance(*asset, owner, *amount)?;
                    projection.debit(*asset, owner, *amount)?;
                    projection.credit(*asset, self.pool_account, *amount)?;
                }
                Leg::Push {
                    asset,
                    recipient,
                    amount,
                } => {
                    projection.debit(*asset, self.pool_account, *amount)?;
                    projection.credit(*asset, recipient, *amount)?;
                }
            }
        }
        Ok(())
    }

    /// Validates, then applies every leg; on a late ledger failure the
    /// applied legs are reversed before the error is returned.
    ///
    /// # Errors
    ///
    /// Any error from [`Settlement::validate`], or the ledger error that
    /// stopped execution. Returns [`DexError::Internal`] if reversing an
    /// applied leg fails, since the ledgers can no longer be trusted to be
    /// consistent.
    pub fn execute<L: AssetLedger>(self, ledger_a: &mut L, ledger_b: &mut L) -> Result<(), DexError> {
        self.validate(ledger_a, ledger_b)?;

        let mut applied: Vec<Applied> = Vec::with_capacity(self.legs.len());
        for leg in self.legs {
            let ledger = select(leg_asset(&leg), ledger_a, ledger_b);
            let allowance_before = match &leg {
                Leg::Pull { owner, .. } => ledger.allowance(owner, self.pool_account),
                Leg::Push { .. } => 0,
            };
            let outcome = match &leg {
                Leg::Pull { owner, amount, .. } => {
                    ledger.transfer_from(self.pool_account, owner, self.pool_account, *amount)
                }
                Leg::Push {
                    recipient, amount, ..
                } => ledger.transfer(self.pool_account, recipient, *amount),
            };
            match outcome {
                Ok(()) => applied.push(Applied {
                    leg,
                    allowance_before,
                }),
                Err(err) => {
                    tracing::warn!(error = %err, applied = applied.len(), "settlement leg rejected, rolling back");
                    rollback(self.pool_account, applied, ledger_a, ledger_b)?;
                    return Err(err.into());
                }
            }
        }
        Ok(())
    }
}

fn leg_asset(leg: &Leg) -> Asset {
    match leg {
        Leg::Pull { asset, .. } | Leg::Push { asset, .. } => *asset,
    }
}

fn select<'l, L>(asset: Asset, ledger_a: &'l mut L, ledger_b: &'l mut L) -> &'l mut L {
    match asset {
        Asset::A => ledger_a,
        Asset::B => ledger_b,
    }
}

/// Reverses applied legs, newest first.
fn rollback<L: AssetLedger>(
    pool_account: &AccountId,
    applied: Vec<Applied>,
    ledger_a: &mut L,
    ledger_b: &mut L,
) -> Result<(), DexError> {
    for Applied {
        leg,
        allowance_before,
    } in applied.into_iter().rev()
    {
        let ledger = select(leg_asset(&leg), ledger_a, ledger_b);
        let reversed = match &leg {
            Leg::Pull { owner, amount, .. } => ledger
                .transfer(pool_account, owner, *amount)
                .map(|()| ledger.approve(owner, pool_account, allowance_before)),
            Leg::Push {
                recipient, amount, ..
            } => ledger.transfer(recipient, pool_account, *amount),
        };
        if let Err(err) = reversed {
            tracing::error!(error = %err, ?leg, "failed to reverse settlement leg");
            return Err(DexError::Internal(format!(
                "settlement rollback failed: {err}"
            )));
        }
    }
    Ok(())
}

/// Projected balances and allowances used during validation.
struct Projection<'l, L> {
    ledger_a: &'l L,
    ledger_b: &'l L,
    spender: &'l AccountId,
    balances: HashMap<(Asset, AccountId), Amount>,
    allowances: HashMap<(Asset, AccountId), Amount>,
}

impl<'l, L: AssetLedger> Projection<'l, L> {
    fn new(ledger_a: &'l L, ledger_b: &'l L, spender: &'l AccountId) -> Self {
        Self {
            ledger_a,
            ledger_b,
            spender,
            balances: HashMap::new(),
            allowances: HashMap::new(),
        }
    }

    fn ledger(&self, asset: Asset) -> &'l L {
        match asset {
            Asset::A => self.ledger_a,
            Asset::B => self.ledger_b,
        }
    }

    fn balance(&self, asset: Asset, account: &AccountId) -> Amount {
        self.balances
            .get(&(asset, account.clone()))
            .copied()
            .unwrap_or_else(|| self.ledger(asset).balance_of(account))
    }

    fn spend_allowance(
        &mut self,
        asset: Asset,
        owner: &AccountId,
        amount: Amount,
    ) -> Result<(), DexError> {
        let available = self
            .allowances
            .get(&(asset, owner.clone()))
            .copied()
            .unwrap_or_else(|| self.ledger(asset).allowance(owner, self.spender));
        if available < amount {
            return Err(DexError::InsufficientAllowance(asset));
        }
        if available != Amount::MAX {
            self.allowances
                .insert((asset, owner.clone()), available - amount);
        }
        Ok(())
    }

    fn debit(&mut self, asset: Asset, account: &AccountId, amount: Amount) -> Result<(), DexError> {
        let available = self.balance(asset, account);
        let remaining = available
            .checked_sub(amount)
            .ok_or_else(|| LedgerError::InsufficientBalance {
                account: account.clone(),
                available,
                required: amount,
            })?;
        self.balances.insert((asset, account.clone()), remaining);
        Ok(())
    }

    fn credit(&mut self, asset: Asset, account: &AccountId, amount: Amount) -> Result<(), DexError> {
        let credited = self
            .balance(asset, account)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow)?;
        self.balances.insert((asset, account.clone()), credited);
        Ok(())
    }
}
