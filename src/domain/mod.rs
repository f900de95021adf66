//! Domain layer: accounts, assets, ledgers, the pool core, and events.
//!
//! Everything in this module is synchronous and free of I/O. The pool is
//! driven through `&mut self`, so one operation always completes before
//! the next can observe its ledgers.

pub mod account_id;
pub mod asset;
pub mod dex_event;
pub mod event_bus;
pub mod ledger;
pub mod pool;
pub mod settlement;

pub use account_id::AccountId;
pub use asset::{Asset, SwapDirection};
pub use dex_event::DexEvent;
pub use event_bus::{EventBus, EventSink};
pub use ledger::{AssetLedger, TokenLedger, TokenMetadata};
pub use pool::{Pool, Reserves, SwapReceipt};
pub use settlement::{Leg, Settlement};

/// Token quantity in the asset's smallest unit.
pub type Amount = u128;
