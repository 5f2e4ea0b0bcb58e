//! Persistence layer: key-value stores and the versioned desk snapshot.
//!
//! [`KeyValueStore`] abstracts whatever durable key-value storage the host
//! provides. [`SnapshotRepository`] writes events and bookings together as
//! one [`Snapshot`] under a single key, so a save is all-or-nothing.

pub mod file;
pub mod memory;
pub mod snapshot;

use std::fmt;

use crate::error::RegistrationError;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use snapshot::{LoadOutcome, SNAPSHOT_KEY, SNAPSHOT_VERSION, Snapshot, SnapshotRepository};

/// Minimal synchronous string key-value store.
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, RegistrationError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), RegistrationError>;

    /// Deletes `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the delete fails.
    fn remove(&self, key: &str) -> Result<(), RegistrationError>;
}
