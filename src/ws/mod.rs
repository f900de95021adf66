//! WebSocket layer: connection handling, message routing, subscriptions.
//!
//! The WebSocket endpoint at `/ws` streams pool events filtered by kind
//! and answers `get_pool` queries.

pub mod connection;
pub mod handler;
pub mod messages;
pub mod subscription;
