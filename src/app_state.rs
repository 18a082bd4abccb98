//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use axum::Router;

use crate::service::RelayService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Relay service owning room membership and fan-out.
    pub relay_service: Arc<RelayService>,
    /// Static file service answering every request that is not an upgrade.
    pub static_files: Router,
}

impl AppState {
    /// Wraps `relay_service` and the static file service for sharing
    /// across handlers.
    #[must_use]
    pub fn new(relay_service: RelayService, static_files: Router) -> Self {
        Self {
            relay_service: Arc::new(relay_service),
            static_files,
        }
    }
}
