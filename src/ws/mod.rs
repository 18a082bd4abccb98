//! WebSocket layer: upgrade handling and the per-socket driver.
//!
//! The upgrade endpoint (default `/ws`) reads the `room` query parameter
//! once, then hands the socket to [`connection::run_connection`].

pub mod connection;
pub mod handler;
