//! Structured announcements generated by the relay itself.
//!
//! These are serialized as `{"type":"system","event":"join","id":"..."}`
//! and are the only messages the relay authors; user payloads travel
//! through [`super::Frame`] untouched.

use serde::Serialize;

use super::{ConnectionId, Frame};
use crate::error::RelayError;

/// Membership change being announced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SystemEventKind {
    /// A connection joined the room.
    Join,
    /// A connection left the room.
    Leave,
}

/// Message kind tag. Always `"system"` for relay-authored events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// Relay-authored event.
    System,
}

/// A join or leave announcement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SystemEvent {
    /// Always [`MessageType::System`].
    #[serde(rename = "type")]
    pub msg_type: MessageType,
    /// Which membership change happened.
    pub event: SystemEventKind,
    /// Identifier of the connection that joined or left.
    pub id: ConnectionId,
}

impl SystemEvent {
    /// Announcement that `id` joined.
    #[must_use]
    pub fn join(id: ConnectionId) -> Self {
        Self {
            msg_type: MessageType::System,
            event: SystemEventKind::Join,
            id,
        }
    }

    /// Announcement that `id` left.
    #[must_use]
    pub fn leave(id: ConnectionId) -> Self {
        Self {
            msg_type: MessageType::System,
            event: SystemEventKind::Leave,
            id,
        }
    }

    /// Encodes the event as a text frame.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::Encode`] if JSON serialization fails.
    pub fn to_frame(&self) -> Result<Frame, RelayError> {
        Ok(Frame::text(serde_json::to_string(self)?))
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn join_serializes_with_type_event_and_id() {
        let event = SystemEvent::join(ConnectionId::from("abc"));
        let Ok(frame) = event.to_frame() else {
            panic!("encoding failed");
        };
        let Some(text) = frame.as_text() else {
            panic!("expected text frame");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(text) else {
            panic!("not valid json");
        };
        assert_eq!(
            value,
            serde_json::json!({"type": "system", "event": "join", "id": "abc"})
        );
    }

    #[test]
    fn leave_serializes_with_leave_tag() {
        let event = SystemEvent::leave(ConnectionId::from("xyz"));
        let json = serde_json::to_string(&event).unwrap_or_default();
        assert_eq!(json, r#"{"type":"system","event":"leave","id":"xyz"}"#);
    }
}
