//! Room identifier and its extraction from the upgrade request.
//!
//! A room is named by an arbitrary caller-supplied token taken from the
//! `room` query parameter. Anything missing, empty, or unparsable falls
//! back to [`RoomId::DEFAULT`]; extraction never fails.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query string shape accepted by the upgrade endpoint.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct RoomQuery {
    /// Requested room token, if any.
    pub room: Option<String>,
}

/// Name of a room.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    /// Sentinel room used when the request names none.
    pub const DEFAULT: &'static str = "default";

    /// Creates a room identifier from a raw token.
    ///
    /// Empty or whitespace-only tokens resolve to [`RoomId::DEFAULT`].
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        let token = token.into();
        if token.trim().is_empty() {
            Self::default()
        } else {
            Self(token)
        }
    }

    /// Resolves the room from an optional query-parameter value.
    #[must_use]
    pub fn from_param(param: Option<&str>) -> Self {
        param.map_or_else(Self::default, Self::new)
    }

    /// Resolves the room from an already-extracted query, or the
    /// extraction failure, falling back to the default room.
    #[must_use]
    pub fn from_query<E>(query: Result<RoomQuery, E>) -> Self {
        match query {
            Ok(q) => Self::from_param(q.room.as_deref()),
            Err(_) => Self::default(),
        }
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RoomId {
    fn default() -> Self {
        Self(Self::DEFAULT.to_string())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
