//! # simple-dex
//!
//! A two-asset liquidity pool with a single manager, exposed over REST and
//! WebSocket.
//!
//! The pool holds balances of two tokens on their own asset ledgers. Only
//! the manager may add or remove liquidity; anyone may swap one token for
//! the other at a fixed 1:1 rate. Reserves are never cached: they are the
//! pool account's live balances on each ledger. Every operation either
//! completes all of its transfers or leaves both ledgers untouched.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── REST Handlers (api/)
//!     ├── WS Handler (ws/)
//!     │
//!     ├── DexService (service/)
//!     ├── EventBus (domain/)
//!     │
//!     ├── Pool + Settlement (domain/)
//!     └── TokenLedger A, TokenLedger B (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
