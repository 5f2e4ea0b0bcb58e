//! Versioned snapshot of the whole desk state.
//!
//! Events and bookings are serialized together into one JSON document and
//! written under [`SNAPSHOT_KEY`]. A single write either lands completely
//! or not at all, so the two collections can never disagree on disk.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::KeyValueStore;
use crate::domain::{Booking, Event};
use crate::error::RegistrationError;

/// Store key holding the snapshot.
pub const SNAPSHOT_KEY: &str = "event_registration_snapshot";

/// Current snapshot schema version. Other versions are treated as corrupt.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Persisted desk state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Schema version.
    pub version: u32,
    /// Events in display order.
    pub events: Vec<Event>,
    /// Bookings in creation order.
    pub bookings: Vec<Booking>,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    events: &'a [Event],
    bookings: &'a [Booking],
}

/// Result of reading the snapshot key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A readable snapshot of the current version.
    Loaded(Snapshot),
    /// Nothing has been persisted yet.
    Absent,
    /// Something is stored but cannot be used.
    Corrupt(String),
}

/// Saves and loads [`Snapshot`]s through a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    store: Arc<dyn KeyValueStore>,
}

impl SnapshotRepository {
    /// Creates a repository over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Persists both collections in one write.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if encoding or the store
    /// write fails.
    pub fn save(&self, events: &[Event], bookings: &[Booking]) -> Result<(), RegistrationError> {
        let json = serde_json::to_string(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            events,
            bookings,
        })
        .map_err(|e| RegistrationError::Persistence(e.to_string()))?;
        self.store.set(SNAPSHOT_KEY, &json)
    }

    /// Reads the snapshot.
    ///
    /// Read failures, malformed JSON and unknown versions all come back as
    /// [`LoadOutcome::Corrupt`] with a description.
    #[must_use]
    pub fn load(&self) -> LoadOutcome {
        let raw = match self.store.get(SNAPSHOT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return LoadOutcome::Absent,
            Err(e) => return LoadOutcome::Corrupt(e.to_string()),
        };
        match serde_json::from_str::<Snapshot>(&raw) {
            Ok(snapshot) if snapshot.version == SNAPSHOT_VERSION => LoadOutcome::Loaded(snapshot),
            Ok(snapshot) => LoadOutcome::Corrupt(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )),
            Err(e) => LoadOutcome::Corrupt(format!("unparsable snapshot: {e}")),
        }
    }

    /// Deletes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the store delete fails.
    pub fn clear(&self) -> Result<(), RegistrationError> {
        self.store.remove(SNAPSHOT_KEY)
    }
}
