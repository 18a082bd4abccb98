//! Domain layer: connections, rooms, and fan-out.
//!
//! This module contains the relay's stateful core: connection identity
//! and liveness, the room registry, the broadcaster that fans frames out
//! to room members, and the structured system announcements.

pub mod broadcaster;
pub mod connection;
pub mod connection_id;
pub mod frame;
pub mod room_id;
pub mod room_registry;
pub mod system_event;

pub use broadcaster::{Broadcaster, DeliveryReport};
pub use connection::{Connection, ConnectionKey, ConnectionState};
pub use connection_id::ConnectionId;
pub use frame::Frame;
pub use room_id::{RoomId, RoomQuery};
pub use room_registry::RoomRegistry;
pub use system_event::{SystemEvent, SystemEventKind};
