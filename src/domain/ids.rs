//! Type-safe identifiers for events and bookings.
//!
//! [`EventId`] wraps the opaque string key of an event (`"e1"`, `"e2"`, ...)
//! and [`BookingId`] wraps a UUID generated when a booking is created.
//! Keeping them as distinct newtypes prevents passing a booking id where an
//! event id is expected.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Opaque identifier of an event, stable for the record's lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates an `EventId` from any string-like value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` if the identifier is empty (no event selected).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EventId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for EventId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Unique identifier of a booking.
///
/// Wraps a UUID. Produced by an [`super::IdGenerator`] exactly once per
/// successful registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct BookingId(uuid::Uuid);

impl BookingId {
    /// Creates a new random `BookingId` (UUID v4).
    #[must_use]
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Creates a `BookingId` from an existing [`uuid::Uuid`].
    #[must_use]
    pub const fn from_uuid(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner [`uuid::Uuid`].
    #[must_use]
    pub const fn as_uuid(&self) -> &uuid::Uuid {
        &self.0
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<uuid::Uuid> for BookingId {
    fn from(uuid: uuid::Uuid) -> Self {
        Self(uuid)
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn event_id_serializes_as_plain_string() {
        let id = EventId::new("e3");
        let json = serde_json::to_string(&id).unwrap_or_default();
        assert_eq!(json, "\"e3\"");
    }

    #[test]
    fn event_id_display_and_empty() {
        assert_eq!(EventId::from("e1").to_string(), "e1");
        assert!(EventId::new("").is_empty());
        assert!(!EventId::new("e1").is_empty());
    }

    #[test]
    fn booking_ids_are_unique() {
        assert_ne!(BookingId::new(), BookingId::new());
    }

    #[test]
    fn booking_id_display_is_uuid_format() {
        let s = BookingId::new().to_string();
        assert_eq!(s.len(), 36);
        assert!(s.contains('-'));
    }

    #[test]
    fn booking_id_deserializes_from_uuid_string() {
        let uuid = uuid::Uuid::from_u128(7);
        let json = format!("\"{uuid}\"");
        let Ok(id) = serde_json::from_str::<BookingId>(&json) else {
            panic!("deserialization failed");
        };
        assert_eq!(*id.as_uuid(), uuid);
    }
}
