//! Relay error types.
//!
//! The room core is total and does not return errors. [`RelayError`]
//! covers what can fail around it: per-connection sends, event
//! encoding, configuration, and server startup.

use crate::domain::ConnectionId;

/// Errors raised by the relay outside the total registry operations.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    /// Attempted to send to a connection that is not open.
    #[error("connection {0} is not open")]
    ConnectionClosed(ConnectionId),

    /// The connection's outbound queue has no receiver anymore.
    #[error("outbound channel for connection {0} is closed")]
    ChannelClosed(ConnectionId),

    /// A system event could not be encoded.
    #[error("failed to encode system event: {0}")]
    Encode(#[from] serde_json::Error),

    /// A configuration value was present but invalid.
    #[error("invalid configuration for {key}: {reason}")]
    InvalidConfig {
        /// Environment variable name.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// I/O failure while binding or serving.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RelayError {
    /// Returns `true` for failures that only affect a single recipient.
    #[must_use]
    pub const fn is_delivery_failure(&self) -> bool {
        matches!(self, Self::ConnectionClosed(_) | Self::ChannelClosed(_))
    }
}
