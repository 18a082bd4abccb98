//! Outbound frames delivered to a connection.
//!
//! A [`Frame`] is either a relayed payload, kept byte-for-byte as it
//! arrived, or the text encoding of a [`super::SystemEvent`]. The relay
//! path never inspects payload contents.

use axum::body::Bytes;
use axum::extract::ws::{Message, Utf8Bytes};

/// A single message queued for delivery. Cloning is cheap (reference
/// counted), so one frame can be fanned out to every room member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text payload.
    Text(Utf8Bytes),
    /// Binary payload.
    Binary(Bytes),
}

impl Frame {
    /// Builds a text frame.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(Utf8Bytes::from(text.into()))
    }

    /// Builds a binary frame.
    #[must_use]
    pub fn binary(bytes: impl Into<Bytes>) -> Self {
        Self::Binary(bytes.into())
    }

    /// Converts an inbound WebSocket message into a relayable frame.
    ///
    /// Control frames (ping, pong, close) are not relayed and yield `None`.
    #[must_use]
    pub fn from_message(msg: Message) -> Option<Self> {
        match msg {
            Message::Text(text) => Some(Self::Text(text)),
            Message::Binary(bytes) => Some(Self::Binary(bytes)),
            Message::Ping(_) | Message::Pong(_) | Message::Close(_) => None,
        }
    }

    /// Returns the text content, if this is a text frame.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Binary(_) => None,
        }
    }

    /// Payload length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Text(text) => text.as_str().len(),
            Self::Binary(bytes) => bytes.len(),
        }
    }

    /// Returns `true` if the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Frame> for Message {
    fn from(frame: Frame) -> Self {
        match frame {
            Frame::Text(text) => Self::Text(text),
            Frame::Binary(bytes) => Self::Binary(bytes),
        }
    }
}
