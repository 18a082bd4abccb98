//! Room membership storage.
//!
//! [`RoomRegistry`] maps each [`RoomId`] to the set of connections in it.
//! Rooms are created on first register and removed inside the same write
//! critical section that removes their last member, so the map never
//! holds an empty room.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use super::{Connection, ConnectionKey, RoomId};

type Members = HashMap<ConnectionKey, Arc<Connection>>;

/// Registry of all rooms and their members.
///
/// # Concurrency
///
/// A single `RwLock` guards the whole map. Register and deregister take
/// the write lock for the full check-and-act; member snapshots take the
/// read lock and release it before any frame is sent.
#[derive(Debug, Default)]
pub struct RoomRegistry {
    rooms: RwLock<HashMap<RoomId, Members>>,
}

impl RoomRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `connection` to the room it was accepted into, creating the
    /// room if needed. The room always comes from the connection, so a
    /// connection can never be a member of two rooms.
    ///
    /// Returns `false` if the connection was already a member.
    pub async fn register(&self, connection: Arc<Connection>) -> bool {
        let mut rooms = self.rooms.write().await;
        let members = rooms.entry(connection.room().clone()).or_default();
        if members.contains_key(&connection.key()) {
            return false;
        }
        members.insert(connection.key(), connection);
        true
    }

    /// Removes `connection` from its room, dropping the room once empty.
    ///
    /// Returns `true` if a member was removed. Unknown rooms and absent
    /// connections are no-ops.
    pub async fn deregister(&self, connection: &Connection) -> bool {
        let room = connection.room();
        let mut rooms = self.rooms.write().await;
        let Some(members) = rooms.get_mut(room) else {
            return false;
        };
        let removed = members.remove(&connection.key()).is_some();
        if members.is_empty() {
            rooms.remove(room);
            tracing::debug!(%room, "room closed");
        }
        removed
    }

    /// Snapshot of the members of `room`; empty if the room does not exist.
    pub async fn members(&self, room: &RoomId) -> Vec<Arc<Connection>> {
        let rooms = self.rooms.read().await;
        rooms
            .get(room)
            .map(|members| members.values().map(Arc::clone).collect())
            .unwrap_or_default()
    }

    /// Returns `true` if `room` currently has members.
    pub async fn contains_room(&self, room: &RoomId) -> bool {
        self.rooms.read().await.contains_key(room)
    }

    /// Number of live rooms.
    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }

    /// Number of registered connections across all rooms.
    pub async fn connection_count(&self) -> usize {
        self.rooms.read().await.values().map(HashMap::len).sum()
    }

    /// Member count per room, sorted by room identifier.
    pub async fn room_sizes(&self) -> Vec<(RoomId, usize)> {
        let rooms = self.rooms.read().await;
        let mut sizes: Vec<_> = rooms
            .iter()
            .map(|(room, members)| (room.clone(), members.len()))
            .collect();
        sizes.sort();
        sizes
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn conn(room: &RoomId) -> Arc<Connection> {
        let (conn, _rx) = Connection::new(room.clone());
        conn.mark_open();
        Arc::new(conn)
    }

    fn keys(members: &[Arc<Connection>]) -> Vec<ConnectionKey> {
        let mut keys: Vec<_> = members.iter().map(|c| c.key()).collect();
        keys.sort();
        keys
    }

    #[tokio::test]
    async fn register_creates_room() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        assert!(!registry.contains_room(&room).await);

        assert!(registry.register(conn(&room)).await);
        assert!(registry.contains_room(&room).await);
        assert_eq!(registry.room_count().await, 1);
    }

    #[tokio::test]
    async fn double_register_is_noop() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        let c = conn(&room);

        assert!(registry.register(Arc::clone(&c)).await);
        assert!(!registry.register(Arc::clone(&c)).await);
        assert_eq!(registry.members(&room).await.len(), 1);
    }

    #[tokio::test]
    async fn members_match_joined_minus_left() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        let c1 = conn(&room);
        let c2 = conn(&room);
        let c3 = conn(&room);
        for c in [&c1, &c2, &c3] {
            registry.register(Arc::clone(c)).await;
        }
        registry.deregister(&c2).await;

        let members = registry.members(&room).await;
        let mut expected = vec![c1.key(), c3.key()];
        expected.sort();
        assert_eq!(keys(&members), expected);
    }

    #[tokio::test]
    async fn join_then_leave_removes_room() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        let c = conn(&room);

        registry.register(Arc::clone(&c)).await;
        assert!(registry.deregister(&c).await);
        assert!(!registry.contains_room(&room).await);
        assert_eq!(registry.room_count().await, 0);
    }

    #[tokio::test]
    async fn room_survives_until_last_member_leaves() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        let c1 = conn(&room);
        let c2 = conn(&room);
        registry.register(Arc::clone(&c1)).await;
        registry.register(Arc::clone(&c2)).await;

        registry.deregister(&c1).await;
        assert!(registry.contains_room(&room).await);
        registry.deregister(&c2).await;
        assert!(!registry.contains_room(&room).await);
    }

    #[tokio::test]
    async fn deregister_unknown_is_noop() {
        let registry = RoomRegistry::new();
        let room = RoomId::new("a");
        let c = conn(&room);
        assert!(!registry.deregister(&c).await);

        let other = conn(&room);
        registry.register(Arc::clone(&other)).await;
        assert!(!registry.deregister(&c).await);
        assert!(registry.contains_room(&room).await);
    }

    #[tokio::test]
    async fn members_of_unknown_room_is_empty() {
        let registry = RoomRegistry::new();
        assert!(registry.members(&RoomId::new("nope")).await.is_empty());
    }

    #[tokio::test]
    async fn rooms_are_isolated() {
        let registry = RoomRegistry::new();
        let a = RoomId::new("a");
        let b = RoomId::new("b");
        let ca = conn(&a);
        let cb = conn(&b);
        registry.register(Arc::clone(&ca)).await;
        registry.register(Arc::clone(&cb)).await;

        assert_eq!(keys(&registry.members(&a).await), vec![ca.key()]);
        assert_eq!(keys(&registry.members(&b).await), vec![cb.key()]);
        assert_eq!(registry.connection_count().await, 2);
        assert_eq!(
            registry.room_sizes().await,
            vec![(a.clone(), 1), (b.clone(), 1)]
        );
    }

    #[tokio::test]
    async fn membership_follows_the_connection_room() {
        let registry = RoomRegistry::new();
        let a = RoomId::new("a");
        let b = RoomId::new("b");
        let c = conn(&a);

        assert!(registry.register(Arc::clone(&c)).await);
        assert!(!registry.register(Arc::clone(&c)).await);

        assert_eq!(keys(&registry.members(&a).await), vec![c.key()]);
        assert!(registry.members(&b).await.is_empty());
        assert!(!registry.contains_room(&b).await);
        assert_eq!(registry.connection_count().await, 1);
    }

    #[tokio::test]
    async fn concurrent_leaves_never_leave_empty_room() {
        let registry = Arc::new(RoomRegistry::new());
        let room = RoomId::new("race");
        let conns: Vec<_> = (0..64).map(|_| conn(&room)).collect();
        for c in &conns {
            registry.register(Arc::clone(c)).await;
        }

        let mut handles = Vec::new();
        for c in conns {
            let registry = Arc::clone(&registry);
            handles.push(tokio::spawn(async move {
                registry.deregister(&c).await
            }));
        }
        for handle in handles {
            let Ok(removed) = handle.await else {
                panic!("task panicked");
            };
            assert!(removed);
        }

        assert!(!registry.contains_room(&room).await);
        assert_eq!(registry.room_count().await, 0);
    }
}
