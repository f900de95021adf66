//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::domain::EventBus;
use crate::service::DexService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dex service for all pool and ledger operations.
    pub dex_service: Arc<DexService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Builds the state from a service, sharing its event bus.
    #[must_use]
    pub fn new(dex_service: DexService) -> Self {
        let event_bus = dex_service.event_bus().clone();
        Self {
            dex_service: Arc::new(dex_service),
            event_bus,
        }
    }
}
