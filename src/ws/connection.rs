//! WebSocket connection driver.
//!
//! Handles the read/write loop for a single WebSocket connection:
//! inbound data frames are relayed to the room, queued outbound frames
//! are written to the socket.

use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket};
use futures_util::{SinkExt, StreamExt};

use crate::domain::{Frame, RoomId};
use crate::service::RelayService;

/// Runs the read/write loop for a single WebSocket connection.
///
/// - Joins `room` and relays every text or binary frame from the peer.
/// - Writes frames queued for this connection by other members.
/// - On close, stream end, read error, or write error, leaves the room.
pub async fn run_connection(socket: WebSocket, room: RoomId, relay_service: Arc<RelayService>) {
    let (mut ws_tx, mut ws_rx) = socket.split();
    let (connection, mut outbound) = relay_service.connect(room).await;

    loop {
        tokio::select! {
            // Incoming message from the peer
            msg = ws_rx.next() => {
                match msg {
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(msg)) => {
                        if let Some(frame) = Frame::from_message(msg) {
                            relay_service.relay(&connection, frame).await;
                        }
                    }
                    Some(Err(err)) => {
                        tracing::debug!(conn_id = %connection.id(), error = %err, "ws read failed");
                        break;
                    }
                }
            }
            // Frame queued by the room
            frame = outbound.recv() => {
                let Some(frame) = frame else { break };
                if let Err(err) = ws_tx.send(Message::from(frame)).await {
                    tracing::debug!(conn_id = %connection.id(), error = %err, "ws write failed");
                    break;
                }
            }
        }
    }

    relay_service.leave(&connection).await;
    tracing::debug!(conn_id = %connection.id(), "ws connection closed");
}
