//! Service layer: business logic orchestration.
//!
//! [`DexService`] serializes access to the pool, logs every outcome, and
//! exposes the ledger operations external parties need (approve,
//! transfer, balance queries).

pub mod dex_service;

pub use dex_service::{DexService, PoolState};
