//! Relay configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Missing values fall back to defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::error::RelayError;

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, multi-field lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level relay configuration.
///
/// Loaded once at startup via [`RelayConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// Socket address to bind the HTTP server to (e.g. `0.0.0.0:8080`).
    pub listen_addr: SocketAddr,

    /// Root directory served by the static file handler.
    pub static_dir: PathBuf,

    /// Restricts WebSocket upgrades to this path. `None` accepts an
    /// upgrade on any path not taken by another route.
    pub ws_path: Option<String>,

    /// Greeting sent directly to each newly opened connection.
    pub welcome_message: Option<String>,

    /// Log output format.
    pub log_format: LogFormat,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            static_dir: PathBuf::from("public"),
            ws_path: None,
            welcome_message: None,
            log_format: LogFormat::Pretty,
        }
    }
}

impl RelayConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns [`RelayError::InvalidConfig`] if `LISTEN_ADDR` is set but
    /// is not a socket address, or `WS_PATH` is set and does not start
    /// with `/`.
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Same as [`RelayConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, RelayError> {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse().map_err(|e: std::net::AddrParseError| {
                RelayError::InvalidConfig {
                    key: "LISTEN_ADDR",
                    reason: e.to_string(),
                }
            })?,
            None => defaults.listen_addr,
        };

        let static_dir = lookup("STATIC_DIR")
            .filter(|s| !s.is_empty())
            .map_or(defaults.static_dir, PathBuf::from);

        let ws_path = lookup("WS_PATH").filter(|s| !s.is_empty());
        if let Some(path) = &ws_path
            && !path.starts_with('/')
        {
            return Err(RelayError::InvalidConfig {
                key: "WS_PATH",
                reason: format!("{path:?} must start with '/'"),
            });
        }

        let welcome_message = lookup("WELCOME_MESSAGE").filter(|s| !s.is_empty());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            listen_addr,
            static_dir,
            ws_path,
            welcome_message,
            log_format,
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(pairs: &[(&str, &str)]) -> Result<RelayConfig, RelayError> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        RelayConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let Ok(cfg) = load(&[]) else {
            panic!("defaults should load");
        };
        assert_eq!(cfg.listen_addr.port(), 8080);
        assert_eq!(cfg.static_dir, PathBuf::from("public"));
        assert!(cfg.ws_path.is_none());
        assert!(cfg.welcome_message.is_none());
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn reads_overrides() {
        let Ok(cfg) = load(&[
            ("LISTEN_ADDR", "127.0.0.1:9000"),
            ("STATIC_DIR", "/srv/www"),
            ("WS_PATH", "/relay"),
            ("WELCOME_MESSAGE", "hi"),
            ("LOG_FORMAT", "json"),
        ]) else {
            panic!("overrides should load");
        };
        assert_eq!(cfg.listen_addr, SocketAddr::from(([127, 0, 0, 1], 9000)));
        assert_eq!(cfg.static_dir, PathBuf::from("/srv/www"));
        assert_eq!(cfg.ws_path.as_deref(), Some("/relay"));
        assert_eq!(cfg.welcome_message.as_deref(), Some("hi"));
        assert_eq!(cfg.log_format, LogFormat::Json);
    }

    #[test]
    fn bad_listen_addr_is_rejected() {
        let result = load(&[("LISTEN_ADDR", "not-an-addr")]);
        assert!(matches!(
            result,
            Err(RelayError::InvalidConfig {
                key: "LISTEN_ADDR",
                ..
            })
        ));
    }

    #[test]
    fn relative_ws_path_is_rejected() {
        let result = load(&[("WS_PATH", "ws")]);
        assert!(matches!(
            result,
            Err(RelayError::InvalidConfig { key: "WS_PATH", .. })
        ));
    }

    #[test]
    fn empty_ws_path_accepts_any_path() {
        let Ok(cfg) = load(&[("WS_PATH", "")]) else {
            panic!("config should load");
        };
        assert!(cfg.ws_path.is_none());
    }

    #[test]
    fn empty_welcome_is_none() {
        let Ok(cfg) = load(&[("WELCOME_MESSAGE", "")]) else {
            panic!("config should load");
        };
        assert!(cfg.welcome_message.is_none());
    }
}
