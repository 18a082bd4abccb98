//! A single relay participant and its outbound channel.
//!
//! [`Connection`] is the handle the registry stores. It carries the
//! display [`ConnectionId`], the room it joined, a liveness flag and an
//! unbounded sender feeding the socket writer task. Sending never blocks
//! and never waits for the peer.

use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};

use tokio::sync::mpsc;

use super::{ConnectionId, Frame, RoomId};
use crate::error::RelayError;

/// Process-unique identity of a connection. Membership sets are keyed by
/// this, never by the display identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionKey(u64);

impl ConnectionKey {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Liveness of a connection. `Closed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    /// Transport accepted, not yet registered.
    Connecting = 0,
    /// Registered and usable for sending.
    Open = 1,
    /// Closed; never reopened.
    Closed = 2,
}

impl ConnectionState {
    const fn from_u8(v: u8) -> Self {
        match v {
            0 => Self::Connecting,
            1 => Self::Open,
            _ => Self::Closed,
        }
    }
}

/// Sending half of a connection's outbound queue.
pub type FrameSender = mpsc::UnboundedSender<Frame>;

/// Receiving half drained by the socket writer.
pub type FrameReceiver = mpsc::UnboundedReceiver<Frame>;

/// Handle to one connected peer.
#[derive(Debug)]
pub struct Connection {
    key: ConnectionKey,
    id: ConnectionId,
    room: RoomId,
    state: AtomicU8,
    outbound: FrameSender,
}

impl Connection {
    /// Creates a connection in the `Connecting` state, returning it with
    /// the receiver its writer task should drain.
    #[must_use]
    pub fn new(room: RoomId) -> (Self, FrameReceiver) {
        let (outbound, rx) = mpsc::unbounded_channel();
        let connection = Self {
            key: ConnectionKey::next(),
            id: ConnectionId::generate(),
            room,
            state: AtomicU8::new(ConnectionState::Connecting as u8),
            outbound,
        };
        (connection, rx)
    }

    /// Identity key used for membership.
    #[must_use]
    pub const fn key(&self) -> ConnectionKey {
        self.key
    }

    /// Display identifier used in announcements.
    #[must_use]
    pub const fn id(&self) -> &ConnectionId {
        &self.id
    }

    /// Room fixed at accept time.
    #[must_use]
    pub const fn room(&self) -> &RoomId {
        &self.room
    }

    /// Current liveness state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// Returns `true` while the connection is `Open`.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.state() == ConnectionState::Open
    }

    /// Moves `Connecting -> Open`. Returns `false` if the connection was
    /// not in `Connecting`.
    pub fn mark_open(&self) -> bool {
        self.state
            .compare_exchange(
                ConnectionState::Connecting as u8,
                ConnectionState::Open as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }

    /// Moves the connection to `Closed`.
    ///
    /// Returns `true` only for the call that performed the transition, so
    /// callers can run close side effects exactly once.
    pub fn mark_closed(&self) -> bool {
        self.state.swap(ConnectionState::Closed as u8, Ordering::AcqRel)
            != ConnectionState::Closed as u8
    }

    /// Queues a frame for delivery.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::ConnectionClosed`] if the connection is not
    /// open, or [`RelayError::ChannelClosed`] if its writer has gone away.
    pub fn send(&self, frame: Frame) -> Result<(), RelayError> {
        if !self.is_open() {
            return Err(RelayError::ConnectionClosed(self.id.clone()));
        }
        self.outbound
            .send(frame)
            .map_err(|_| RelayError::ChannelClosed(self.id.clone()))
    }
}
