//! Relay service: drives each connection through join, relay and leave.

use std::sync::Arc;

use crate::domain::connection::FrameReceiver;
use crate::domain::{
    Broadcaster, Connection, DeliveryReport, Frame, RoomId, RoomRegistry, SystemEvent,
};

/// Orchestration layer wiring connection events to the [`RoomRegistry`]
/// and [`Broadcaster`].
///
/// Every lifecycle method follows the pattern: update liveness → update
/// membership → announce. Closing is idempotent: only the first `leave`
/// for a connection deregisters it and announces its departure.
#[derive(Debug, Clone)]
pub struct RelayService {
    registry: Arc<RoomRegistry>,
    broadcaster: Broadcaster,
    welcome: Option<Frame>,
}

impl RelayService {
    /// Creates a new `RelayService` over `registry`.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        let broadcaster = Broadcaster::new(Arc::clone(&registry));
        Self {
            registry,
            broadcaster,
            welcome: None,
        }
    }

    /// Sends `text` directly to every connection as it opens.
    #[must_use]
    pub fn with_welcome(mut self, text: Option<String>) -> Self {
        self.welcome = text.map(Frame::text);
        self
    }

    /// Returns a reference to the inner [`RoomRegistry`].
    #[must_use]
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Opens a new connection in `room` and returns it with the receiver
    /// its socket writer should drain.
    pub async fn connect(&self, room: RoomId) -> (Arc<Connection>, FrameReceiver) {
        let (connection, rx) = Connection::new(room);
        (self.join(connection).await, rx)
    }

    /// Opens `connection`: registers it in its room, greets it if a
    /// welcome message is configured, and announces it to the other
    /// members.
    pub async fn join(&self, connection: Connection) -> Arc<Connection> {
        let connection = Arc::new(connection);
        if !connection.mark_open() {
            tracing::warn!(conn_id = %connection.id(), "join on a connection that is not connecting");
            return connection;
        }
        let room = connection.room().clone();
        self.registry.register(Arc::clone(&connection)).await;

        if let Some(welcome) = &self.welcome
            && let Err(err) = connection.send(welcome.clone())
        {
            tracing::debug!(conn_id = %connection.id(), error = %err, "welcome not delivered");
        }

        let report = self
            .announce(&room, SystemEvent::join(connection.id().clone()), &connection)
            .await;
        tracing::info!(
            %room,
            conn_id = %connection.id(),
            notified = report.delivered,
            "connection joined"
        );
        connection
    }

    /// Forwards `frame` verbatim to every other member of the sender's
    /// room. Frames from a connection that is no longer open are dropped.
    pub async fn relay(&self, sender: &Connection, frame: Frame) -> DeliveryReport {
        if !sender.is_open() {
            return DeliveryReport::default();
        }
        let report = self
            .broadcaster
            .broadcast(sender.room(), &frame, Some(sender.key()))
            .await;
        tracing::trace!(
            room = %sender.room(),
            conn_id = %sender.id(),
            bytes = frame.len(),
            delivered = report.delivered,
            "frame relayed"
        );
        report
    }

    /// Closes `connection`: deregisters it and announces the departure to
    /// whoever remains in its room.
    ///
    /// Returns `false` if the connection was already closed, in which
    /// case nothing else happens.
    pub async fn leave(&self, connection: &Connection) -> bool {
        if !connection.mark_closed() {
            return false;
        }
        let room = connection.room();
        self.registry.deregister(connection).await;
        let report = self
            .announce(room, SystemEvent::leave(connection.id().clone()), connection)
            .await;
        tracing::info!(
            %room,
            conn_id = %connection.id(),
            notified = report.delivered,
            "connection left"
        );
        true
    }

    async fn announce(
        &self,
        room: &RoomId,
        event: SystemEvent,
        subject: &Connection,
    ) -> DeliveryReport {
        match event.to_frame() {
            Ok(frame) => {
                self.broadcaster
                    .broadcast(room, &frame, Some(subject.key()))
                    .await
            }
            Err(err) => {
                tracing::warn!(%room, error = %err, "failed to encode system event");
                DeliveryReport::default()
            }
        }
    }
}
