//! Ordered event list with capacity tracking.
//!
//! [`EventCatalog`] is the only place event capacity changes. Every
//! mutation goes through `&mut self`, so the "check slots, then lower
//! them" sequence can never be observed half-done by another caller.

use super::seed::default_events;
use super::{Event, EventId};
use crate::error::RegistrationError;

/// In-memory list of events in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventCatalog {
    events: Vec<Event>,
}

impl EventCatalog {
    /// Creates a catalog from previously persisted events.
    #[must_use]
    pub const fn new(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// Creates a catalog holding the built-in default events.
    #[must_use]
    pub fn seeded() -> Self {
        Self::new(default_events())
    }

    /// Returns all events in display order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn find_by_id(&self, id: &EventId) -> Option<&Event> {
        self.events.iter().find(|e| &e.id == id)
    }

    /// Takes one slot from the event.
    ///
    /// Succeeds only if the event exists and still has capacity; the
    /// returned event reflects the lowered count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::CapacityExhausted`] if the event is
    /// unknown or already full. Nothing is mutated in that case.
    pub fn decrement(&mut self, id: &EventId) -> Result<&Event, RegistrationError> {
        let Some(event) = self.events.iter_mut().find(|e| &e.id == id) else {
            return Err(RegistrationError::CapacityExhausted {
                event_id: id.clone(),
            });
        };
        let Some(remaining) = event.slots.checked_sub(1) else {
            return Err(RegistrationError::CapacityExhausted {
                event_id: id.clone(),
            });
        };
        event.slots = remaining;
        Ok(event)
    }

    /// Gives back a slot taken by [`Self::decrement`] whose registration
    /// could not be persisted.
    pub(crate) fn release(&mut self, id: &EventId) {
        if let Some(event) = self.events.iter_mut().find(|e| &e.id == id) {
            event.slots = event.slots.saturating_add(1);
        }
    }

    /// Returns the number of events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if the catalog holds no events.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn slots_of(catalog: &EventCatalog, id: &str) -> Option<u32> {
        catalog.find_by_id(&EventId::new(id)).map(|e| e.slots)
    }

    #[test]
    fn seeded_catalog_matches_defaults() {
        let catalog = EventCatalog::seeded();
        assert_eq!(catalog.len(), 5);
        assert_eq!(slots_of(&catalog, "e1"), Some(25));
        assert_eq!(slots_of(&catalog, "e5"), Some(100));
    }

    #[test]
    fn decrement_lowers_slots_by_one() {
        let mut catalog = EventCatalog::seeded();
        let Ok(event) = catalog.decrement(&EventId::new("e2")) else {
            panic!("decrement should succeed");
        };
        assert_eq!(event.slots, 9);
        assert_eq!(slots_of(&catalog, "e2"), Some(9));
    }

    #[test]
    fn decrement_on_full_event_fails_without_mutation() {
        let mut catalog = EventCatalog::seeded();
        let id = EventId::new("e4");
        for _ in 0..5 {
            assert!(catalog.decrement(&id).is_ok());
        }
        assert_eq!(slots_of(&catalog, "e4"), Some(0));

        let result = catalog.decrement(&id);
        assert!(matches!(
            result,
            Err(RegistrationError::CapacityExhausted { .. })
        ));
        assert_eq!(slots_of(&catalog, "e4"), Some(0));
    }

    #[test]
    fn decrement_on_unknown_event_fails() {
        let mut catalog = EventCatalog::seeded();
        let before = catalog.clone();
        let result = catalog.decrement(&EventId::new("nope"));
        assert!(matches!(
            result,
            Err(RegistrationError::CapacityExhausted { .. })
        ));
        assert_eq!(catalog, before);
    }

    #[test]
    fn release_restores_a_slot() {
        let mut catalog = EventCatalog::seeded();
        let id = EventId::new("e3");
        let _ = catalog.decrement(&id);
        catalog.release(&id);
        assert_eq!(slots_of(&catalog, "e3"), Some(8));
    }

    #[test]
    fn find_by_id_misses_gracefully() {
        let catalog = EventCatalog::new(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.find_by_id(&EventId::new("e1")).is_none());
    }
}
