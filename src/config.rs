//! Desk configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Unset or unparsable values fall back to defaults.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::service::CorruptStatePolicy;

/// Which [`crate::persistence::KeyValueStore`] backs the desk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON file per key under [`RegistrationConfig::data_dir`].
    File,
    /// Process memory; nothing survives a restart.
    Memory,
}

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Top-level configuration.
///
/// Loaded once at startup via [`RegistrationConfig::from_env`].
#[derive(Debug, Clone)]
pub struct RegistrationConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Storage backend.
    pub store_backend: StoreBackend,

    /// Directory for the file store.
    pub data_dir: PathBuf,

    /// Default length of the recent-bookings view.
    pub recent_bookings_limit: usize,

    /// Behaviour when the persisted snapshot is unreadable.
    pub corrupt_state_policy: CorruptStatePolicy,

    /// Capacity of the notification broadcast channel.
    pub event_bus_capacity: usize,

    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,

    /// Log line format.
    pub log_format: LogFormat,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            store_backend: StoreBackend::File,
            data_dir: PathBuf::from("./data"),
            recent_bookings_limit: 5,
            corrupt_state_policy: CorruptStatePolicy::Reseed,
            event_bus_capacity: 1024,
            request_timeout_secs: 10,
            log_format: LogFormat::Pretty,
        }
    }
}

impl RegistrationConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is set but cannot be parsed as a
    /// [`SocketAddr`].
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if `LISTEN_ADDR` is present but unparsable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, Box<dyn std::error::Error + Send + Sync>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let listen_addr = match lookup("LISTEN_ADDR") {
            Some(raw) => raw.parse()?,
            None => defaults.listen_addr,
        };

        let store_backend = match lookup("STORE_BACKEND").as_deref() {
            Some("memory") | Some("MEMORY") => StoreBackend::Memory,
            Some("file") | Some("FILE") => StoreBackend::File,
            _ => defaults.store_backend,
        };

        let data_dir = lookup("DATA_DIR").map_or(defaults.data_dir, PathBuf::from);

        let recent_bookings_limit = parse_var(
            &lookup,
            "RECENT_BOOKINGS_LIMIT",
            defaults.recent_bookings_limit,
        );

        let corrupt_state_policy = if parse_bool(&lookup, "RESEED_ON_CORRUPT", true) {
            CorruptStatePolicy::Reseed
        } else {
            CorruptStatePolicy::Fail
        };

        let event_bus_capacity =
            parse_var(&lookup, "EVENT_BUS_CAPACITY", defaults.event_bus_capacity);
        let request_timeout_secs = parse_var(
            &lookup,
            "REQUEST_TIMEOUT_SECS",
            defaults.request_timeout_secs,
        );

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => defaults.log_format,
        };

        Ok(Self {
            listen_addr,
            store_backend,
            data_dir,
            recent_bookings_limit,
            corrupt_state_policy,
            event_bus_capacity,
            request_timeout_secs,
            log_format,
        })
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Parses a variable as a boolean. Accepts `"true"`, `"1"`, `"false"`,
/// `"0"` (either case). Returns `default` otherwise.
fn parse_bool<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).as_deref() {
        Some("true") | Some("TRUE") | Some("1") => true,
        Some("false") | Some("FALSE") | Some("0") => false,
        _ => default,
    }
}
