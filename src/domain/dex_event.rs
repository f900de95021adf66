//! Domain events emitted by the pool after every successful mutation.
//!
//! Events are observability only: they are published through an
//! [`super::EventSink`] once all ledger transfers of an operation have
//! completed, and nothing in the pool reads them back.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

use super::{AccountId, Amount};

/// Serializes an [`Amount`] as a decimal string so u128 precision
/// survives JSON consumers.
fn amount_as_string<S: Serializer>(amount: &Amount, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(amount)
}

/// Domain event emitted by the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum DexEvent {
    /// The manager deposited liquidity.
    LiquidityAdded {
        /// Manager account that supplied the assets.
        manager: AccountId,
        /// Token A deposited.
        #[serde(serialize_with = "amount_as_string")]
        amount_a: Amount,
        /// Token B deposited.
        #[serde(serialize_with = "amount_as_string")]
        amount_b: Amount,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The manager withdrew liquidity.
    LiquidityRemoved {
        /// Manager account that received the assets.
        manager: AccountId,
        /// Token A withdrawn.
        #[serde(serialize_with = "amount_as_string")]
        amount_a: Amount,
        /// Token B withdrawn.
        #[serde(serialize_with = "amount_as_string")]
        amount_b: Amount,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A trader sold token A for token B.
    SwappedAForB {
        /// Trader account.
        trader: AccountId,
        /// Token A pulled from the trader.
        #[serde(serialize_with = "amount_as_string")]
        amount_in: Amount,
        /// Token B paid to the trader.
        #[serde(serialize_with = "amount_as_string")]
        amount_out: Amount,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },

    /// A trader sold token B for token A.
    SwappedBForA {
        /// Trader account.
        trader: AccountId,
        /// Token B pulled from the trader.
        #[serde(serialize_with = "amount_as_string")]
        amount_in: Amount,
        /// Token A paid to the trader.
        #[serde(serialize_with = "amount_as_string")]
        amount_out: Amount,
        /// Emission timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DexEvent {
    /// Every event type string, in declaration order.
    pub const EVENT_TYPES: [&'static str; 4] = [
        "liquidity_added",
        "liquidity_removed",
        "swapped_a_for_b",
        "swapped_b_for_a",
    ];

    /// Returns the event type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::LiquidityAdded { .. } => "liquidity_added",
            Self::LiquidityRemoved { .. } => "liquidity_removed",
            Self::SwappedAForB { .. } => "swapped_a_for_b",
            Self::SwappedBForA { .. } => "swapped_b_for_a",
        }
    }

    /// Returns the account that triggered the event.
    #[must_use]
    pub fn account(&self) -> &AccountId {
        match self {
            Self::LiquidityAdded { manager, .. } | Self::LiquidityRemoved { manager, .. } => {
                manager
            }
            Self::SwappedAForB { trader, .. } | Self::SwappedBForA { trader, .. } => trader,
        }
    }

    /// Returns the two amounts carried by the event.
    ///
    /// `(amount_a, amount_b)` for liquidity events, `(amount_in,
    /// amount_out)` for swaps.
    #[must_use]
    pub const fn amounts(&self) -> (Amount, Amount) {
        match self {
            Self::LiquidityAdded {
                amount_a, amount_b, ..
            }
            | Self::LiquidityRemoved {
                amount_a, amount_b, ..
            } => (*amount_a, *amount_b),
            Self::SwappedAForB {
                amount_in,
                amount_out,
                ..
            }
            | Self::SwappedBForA {
                amount_in,
                amount_out,
                ..
            } => (*amount_in, *amount_out),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn swap_event() -> DexEvent {
        DexEvent::SwappedAForB {
            trader: AccountId::new("0xtrader"),
            amount_in: 1_000,
            amount_out: 1_000,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn event_type_matches_serde_tag() {
        let event = swap_event();
        let Ok(value) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(
            value.get("event_type").and_then(|v| v.as_str()),
            Some(event.event_type_str())
        );
    }

    #[test]
    fn amounts_serialize_as_strings() {
        let event = DexEvent::LiquidityAdded {
            manager: AccountId::new("0xowner"),
            amount_a: u128::MAX,
            amount_b: 7,
            timestamp: Utc::now(),
        };
        let Ok(value) = serde_json::to_value(&event) else {
            panic!("serialization failed");
        };
        assert_eq!(
            value.get("amount_a").and_then(|v| v.as_str()),
            Some("340282366920938463463374607431768211455")
        );
        assert_eq!(value.get("amount_b").and_then(|v| v.as_str()), Some("7"));
        assert_eq!(
            value.get("manager").and_then(|v| v.as_str()),
            Some("0xowner")
        );
    }

    #[test]
    fn accessors() {
        let event = swap_event();
        assert_eq!(event.account().as_str(), "0xtrader");
        assert_eq!(event.amounts(), (1_000, 1_000));
        assert!(DexEvent::EVENT_TYPES.contains(&event.event_type_str()));
    }
}
