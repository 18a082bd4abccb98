//! # room-relay
//!
//! Room-based WebSocket relay with a static file server.
//!
//! Peers connect to the upgrade endpoint with an optional `room` query
//! parameter. Every text or binary frame a peer sends is forwarded
//! verbatim to the other members of its room, and the room is told when
//! members join or leave. Every other path is served from a static
//! directory.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP, WebSocket)
//!     │
//!     ├── WS Handler (ws/)          static files, /health, /rooms (api/)
//!     │
//!     ├── RelayService (service/)   join → relay → leave
//!     │
//!     ├── Broadcaster (domain/)
//!     └── RoomRegistry (domain/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod service;
pub mod ws;
