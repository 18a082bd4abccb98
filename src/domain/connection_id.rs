//! Display identifier handed to every connection at join time.
//!
//! [`ConnectionId`] is what peers see in `join` / `leave` announcements.
//! It is not the key the registry uses for membership: two connections
//! are distinct by identity (see [`super::ConnectionKey`]) even if their
//! display identifiers were ever to collide.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Random, human-presentable connection identifier (UUID v4, simple form).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConnectionId(String);

impl ConnectionId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().simple().to_string())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for ConnectionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for ConnectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
