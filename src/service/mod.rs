//! Service layer: connection lifecycle orchestration.

pub mod relay_service;

pub use relay_service::RelayService;
