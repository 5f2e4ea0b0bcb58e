//! The registration desk: single owner of all registration state.
//!
//! [`RegistrationDesk`] holds the event catalog, the booking ledger and the
//! snapshot repository. It is built once at startup with
//! [`RegistrationDesk::load`] and every mutation follows the same sequence:
//! decrement capacity → append booking → save snapshot. If the save fails
//! the first two steps are undone, so a registration either fully commits
//! or leaves no trace.

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{
    Booking, BookingLedger, Clock, Event, EventCatalog, EventId, IdGenerator, RegistrationForm,
    RegistrationMode, booking,
};
use crate::error::RegistrationError;
use crate::persistence::{LoadOutcome, SnapshotRepository};

/// Event name shown for bookings whose event is no longer in the catalog.
pub const MISSING_EVENT_NAME: &str = "Event";

/// What to do when the persisted snapshot cannot be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CorruptStatePolicy {
    /// Discard the unreadable data and start over from the seed.
    #[default]
    Reseed,
    /// Refuse to start.
    Fail,
}

/// How the desk state was obtained by [`RegistrationDesk::load`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadReport {
    /// Restored from a readable snapshot.
    Restored {
        /// Number of events restored.
        events: usize,
        /// Number of bookings restored.
        bookings: usize,
    },
    /// No snapshot existed; seeded from the defaults.
    Seeded,
    /// A snapshot existed but was unreadable; seeded from the defaults.
    Reseeded {
        /// Why the snapshot was rejected.
        reason: String,
    },
}

/// Result of a committed registration.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// The recorded booking.
    pub booking: Booking,
    /// Name of the event booked.
    pub event_name: String,
    /// Capacity left on the event.
    pub slots_remaining: u32,
    /// Success notice for the user.
    pub notice: String,
}

/// A booking paired with the name of its event, for confirmation lists.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    /// The booking.
    pub booking: Booking,
    /// Event name, or [`MISSING_EVENT_NAME`] if the event is gone.
    pub event_name: String,
}

/// Explicit state container for events and bookings.
#[derive(Debug)]
pub struct RegistrationDesk {
    catalog: EventCatalog,
    ledger: BookingLedger,
    repository: SnapshotRepository,
    ids: Arc<dyn IdGenerator>,
    clock: Arc<dyn Clock>,
}

impl RegistrationDesk {
    /// Loads the desk from the repository, seeding defaults when nothing
    /// usable is stored.
    ///
    /// A fresh seed is persisted immediately so later loads are stable. A
    /// failure to persist the seed is logged, not returned; the desk still
    /// starts with the seed in memory.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::CorruptState`] when the snapshot is
    /// unreadable and `policy` is [`CorruptStatePolicy::Fail`].
    pub fn load(
        repository: SnapshotRepository,
        ids: Arc<dyn IdGenerator>,
        clock: Arc<dyn Clock>,
        policy: CorruptStatePolicy,
    ) -> Result<(Self, LoadReport), RegistrationError> {
        let (catalog, ledger, report) = match repository.load() {
            LoadOutcome::Loaded(snapshot) => {
                let report = LoadReport::Restored {
                    events: snapshot.events.len(),
                    bookings: snapshot.bookings.len(),
                };
                (
                    EventCatalog::new(snapshot.events),
                    BookingLedger::new(snapshot.bookings),
                    report,
                )
            }
            LoadOutcome::Absent => (
                EventCatalog::seeded(),
                BookingLedger::default(),
                LoadReport::Seeded,
            ),
            LoadOutcome::Corrupt(reason) => match policy {
                CorruptStatePolicy::Reseed => {
                    tracing::warn!(%reason, "persisted snapshot unreadable; reseeding defaults");
                    (
                        EventCatalog::seeded(),
                        BookingLedger::default(),
                        LoadReport::Reseeded { reason },
                    )
                }
                CorruptStatePolicy::Fail => return Err(RegistrationError::CorruptState(reason)),
            },
        };

        let desk = Self {
            catalog,
            ledger,
            repository,
            ids,
            clock,
        };

        match &report {
            LoadReport::Restored { events, bookings } => {
                tracing::info!(events, bookings, "desk state restored");
            }
            LoadReport::Seeded | LoadReport::Reseeded { .. } => {
                if let Err(e) = desk.persist() {
                    tracing::warn!(error = %e, "could not persist seed state");
                }
                tracing::info!(events = desk.catalog.len(), "desk seeded with default events");
            }
        }

        Ok((desk, report))
    }

    /// Returns all events in display order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        self.catalog.events()
    }

    /// Looks up an event by id.
    #[must_use]
    pub fn find_event(&self, id: &EventId) -> Option<&Event> {
        self.catalog.find_by_id(id)
    }

    /// Returns every booking in creation order.
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        self.ledger.bookings()
    }

    /// Returns up to `n` latest bookings, newest first.
    pub fn recent_bookings(&self, n: usize) -> impl Iterator<Item = &Booking> + '_ {
        self.ledger.recent(n)
    }

    /// Returns up to `n` latest bookings with their event names, newest
    /// first. Bookings for events no longer in the catalog get
    /// [`MISSING_EVENT_NAME`].
    #[must_use]
    pub fn confirmations(&self, n: usize) -> Vec<Confirmation> {
        self.ledger
            .recent(n)
            .map(|b| Confirmation {
                booking: b.clone(),
                event_name: self
                    .catalog
                    .find_by_id(&b.event_id)
                    .map_or_else(|| MISSING_EVENT_NAME.to_string(), |e| e.name.clone()),
            })
            .collect()
    }

    /// One-click registration recording a placeholder registrant.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::CapacityExhausted`] if the event is full
    /// or unknown, or [`RegistrationError::Persistence`] if the snapshot
    /// cannot be saved (the registration is then rolled back).
    pub fn register_quick(&mut self, event_id: &EventId) -> Result<Receipt, RegistrationError> {
        self.commit(
            event_id,
            booking::QUICK_REGISTER_NAME,
            booking::QUICK_REGISTER_STUDENT_ID,
            RegistrationMode::Quick,
        )
    }

    /// Validates the form and registers the named registrant.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Validation`] if any field is invalid
    /// (nothing is mutated), otherwise the same errors as
    /// [`Self::register_quick`].
    pub fn register_with_details(
        &mut self,
        form: &RegistrationForm,
    ) -> Result<Receipt, RegistrationError> {
        let valid = form.validate()?;
        self.commit(
            &valid.event_id,
            &valid.name,
            &valid.student_id,
            RegistrationMode::Form,
        )
    }

    /// Starts over from the seed with an empty ledger.
    ///
    /// The seed overwrites the stored snapshot before memory is touched; on
    /// failure both stay as they were.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the new seed cannot be
    /// saved.
    pub fn reset(&mut self) -> Result<(), RegistrationError> {
        let catalog = EventCatalog::seeded();
        let ledger = BookingLedger::default();
        if let Err(e) = self.repository.save(catalog.events(), ledger.bookings()) {
            tracing::error!(error = %e, "reset aborted: save failed");
            return Err(e);
        }
        self.catalog = catalog;
        self.ledger = ledger;
        tracing::info!("desk reset to default events");
        Ok(())
    }

    fn commit(
        &mut self,
        event_id: &EventId,
        name: &str,
        student_id: &str,
        mode: RegistrationMode,
    ) -> Result<Receipt, RegistrationError> {
        let (event_name, slots_remaining) = match self.catalog.decrement(event_id) {
            Ok(event) => (event.name.clone(), event.slots),
            Err(e) => {
                tracing::warn!(%event_id, "registration rejected: no capacity");
                return Err(e);
            }
        };

        let booking = self.ledger.append(
            self.ids.next(),
            event_id.clone(),
            name,
            student_id,
            self.clock.now(),
        );

        if let Err(e) = self.persist() {
            self.ledger.discard_last();
            self.catalog.release(event_id);
            tracing::error!(%event_id, error = %e, "registration rolled back: save failed");
            return Err(e);
        }

        tracing::info!(
            %event_id,
            booking_id = %booking.id,
            slots_remaining,
            "registration committed"
        );

        let notice = mode.success_notice(&booking, &event_name);
        Ok(Receipt {
            booking,
            event_name,
            slots_remaining,
            notice,
        })
    }

    fn persist(&self) -> Result<(), RegistrationError> {
        self.repository
            .save(self.catalog.events(), self.ledger.bookings())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::domain::{FixedClock, FormField, SequentialIdGenerator};
    use crate::persistence::{KeyValueStore, MemoryStore, SNAPSHOT_KEY};

    /// Memory store whose writes can be switched to fail.
    #[derive(Debug, Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: AtomicBool,
    }

    impl KeyValueStore for FlakyStore {
        fn get(&self, key: &str) -> Result<Option<String>, RegistrationError> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> Result<(), RegistrationError> {
            if self.fail_writes.load(Ordering::SeqCst) {
                return Err(RegistrationError::Persistence("quota exceeded".to_string()));
            }
            self.inner.set(key, value)
        }

        fn remove(&self, key: &str) -> Result<(), RegistrationError> {
            self.inner.remove(key)
        }
    }

    fn clock() -> Arc<FixedClock> {
        let Some(time) = Utc.with_ymd_and_hms(2025, 9, 1, 9, 30, 0).single() else {
            panic!("valid timestamp");
        };
        Arc::new(FixedClock::new(time))
    }

    fn load_from(
        store: Arc<dyn KeyValueStore>,
        policy: CorruptStatePolicy,
    ) -> (RegistrationDesk, LoadReport) {
        let result = RegistrationDesk::load(
            SnapshotRepository::new(store),
            Arc::new(SequentialIdGenerator::new()),
            clock(),
            policy,
        );
        let Ok(loaded) = result else {
            panic!("desk load failed");
        };
        loaded
    }

    fn fresh_desk() -> (Arc<MemoryStore>, RegistrationDesk) {
        let store = Arc::new(MemoryStore::new());
        let (desk, _) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        (store, desk)
    }

    fn slots(desk: &RegistrationDesk, id: &str) -> Option<u32> {
        desk.find_event(&EventId::new(id)).map(|e| e.slots)
    }

    #[test]
    fn fresh_store_seeds_and_persists_defaults() {
        let store = Arc::new(MemoryStore::new());
        let (desk, report) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert_eq!(report, LoadReport::Seeded);
        let all: Vec<u32> = desk.events().iter().map(|e| e.slots).collect();
        assert_eq!(all, vec![25, 10, 8, 5, 100]);
        assert!(desk.bookings().is_empty());
        assert!(matches!(store.get(SNAPSHOT_KEY), Ok(Some(_))));
    }

    #[test]
    fn reloading_restores_the_same_state() {
        let (store, mut desk) = fresh_desk();
        assert!(desk.register_quick(&EventId::new("e1")).is_ok());

        let (first, report) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert_eq!(
            report,
            LoadReport::Restored {
                events: 5,
                bookings: 1
            }
        );
        let (second, _) = load_from(store, CorruptStatePolicy::Reseed);
        assert_eq!(first.events(), second.events());
        assert_eq!(first.bookings(), second.bookings());
        assert_eq!(first.events(), desk.events());
        assert_eq!(first.bookings(), desk.bookings());
    }

    #[test]
    fn quick_register_until_full() {
        let (_, mut desk) = fresh_desk();
        let id = EventId::new("e4");
        for expected in (0..5).rev() {
            let Ok(receipt) = desk.register_quick(&id) else {
                panic!("registration should succeed");
            };
            assert_eq!(receipt.slots_remaining, expected);
            assert_eq!(receipt.event_name, "Design Thinking Sprint");
            assert!(receipt.booking.is_quick());
        }
        assert_eq!(slots(&desk, "e4"), Some(0));

        let sixth = desk.register_quick(&id);
        assert!(matches!(
            sixth,
            Err(RegistrationError::CapacityExhausted { .. })
        ));
        assert_eq!(slots(&desk, "e4"), Some(0));
        assert_eq!(desk.bookings().len(), 5);
    }

    #[test]
    fn quick_register_unknown_event_records_nothing() {
        let (_, mut desk) = fresh_desk();
        let result = desk.register_quick(&EventId::new("e99"));
        assert!(matches!(
            result,
            Err(RegistrationError::CapacityExhausted { .. })
        ));
        assert!(desk.bookings().is_empty());
    }

    #[test]
    fn register_with_details_records_student() {
        let (_, mut desk) = fresh_desk();
        let form = RegistrationForm::new("e2", "Jane Doe", "1234567");
        let Ok(receipt) = desk.register_with_details(&form) else {
            panic!("registration should succeed");
        };
        assert_eq!(slots(&desk, "e2"), Some(9));
        assert_eq!(desk.bookings().len(), 1);
        assert_eq!(receipt.booking.student_id, "1234567");
        assert_eq!(receipt.booking.id.as_uuid().as_u128(), 1);
        assert_eq!(receipt.booking.created_at, clock().now());
        assert_eq!(
            receipt.notice,
            "Registered Jane Doe (ID: 1234567) for \"AI in Healthcare Panel\"."
        );
    }

    #[test]
    fn invalid_details_mutate_nothing() {
        let (_, mut desk) = fresh_desk();
        let form = RegistrationForm::new("e3", "A", "12");
        let Err(RegistrationError::Validation(errors)) = desk.register_with_details(&form) else {
            panic!("expected validation error");
        };
        assert!(errors.has(FormField::Name));
        assert!(errors.has(FormField::StudentId));
        assert_eq!(slots(&desk, "e3"), Some(8));
        assert!(desk.bookings().is_empty());
    }

    #[test]
    fn failed_save_rolls_back_registration() {
        let store = Arc::new(FlakyStore::default());
        let (mut desk, _) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        store.fail_writes.store(true, Ordering::SeqCst);

        let result = desk.register_quick(&EventId::new("e2"));
        assert!(matches!(result, Err(RegistrationError::Persistence(_))));
        assert_eq!(slots(&desk, "e2"), Some(10));
        assert!(desk.bookings().is_empty());

        store.fail_writes.store(false, Ordering::SeqCst);
        assert!(desk.register_quick(&EventId::new("e2")).is_ok());
        assert_eq!(slots(&desk, "e2"), Some(9));
    }

    #[test]
    fn corrupt_snapshot_reseeds_by_default() {
        let store = Arc::new(MemoryStore::new());
        assert!(store.set(SNAPSHOT_KEY, "{broken").is_ok());
        let (desk, report) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert!(matches!(report, LoadReport::Reseeded { .. }));
        assert_eq!(desk.events().len(), 5);

        let (_, again) = load_from(store, CorruptStatePolicy::Reseed);
        assert!(matches!(again, LoadReport::Restored { .. }));
    }

    #[test]
    fn corrupt_snapshot_fails_when_reseeding_disabled() {
        let store = Arc::new(MemoryStore::new());
        assert!(store.set(SNAPSHOT_KEY, "{broken").is_ok());
        let result = RegistrationDesk::load(
            SnapshotRepository::new(store),
            Arc::new(SequentialIdGenerator::new()),
            clock(),
            CorruptStatePolicy::Fail,
        );
        assert!(matches!(result, Err(RegistrationError::CorruptState(_))));
    }

    #[test]
    fn confirmations_are_newest_first_and_tolerate_missing_events() {
        let store = Arc::new(MemoryStore::new());
        let raw = serde_json::json!({
            "version": 1,
            "events": [{"id": "e1", "name": "Talk", "date": "2025-09-10", "venue": "Hall", "slots": 3}],
            "bookings": [{
                "id": "00000000-0000-0000-0000-0000000000aa",
                "eventId": "gone",
                "name": "Old Booking",
                "studentId": "7654321",
                "createdAt": "2025-08-01T10:00:00Z"
            }]
        });
        assert!(store.set(SNAPSHOT_KEY, &raw.to_string()).is_ok());
        let (mut desk, _) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert!(desk.register_quick(&EventId::new("e1")).is_ok());

        let confirmations = desk.confirmations(5);
        let names: Vec<&str> = confirmations.iter().map(|c| c.event_name.as_str()).collect();
        assert_eq!(names, vec!["Talk", MISSING_EVENT_NAME]);
    }

    #[test]
    fn reset_restores_seed_and_empties_ledger() {
        let (store, mut desk) = fresh_desk();
        assert!(desk.register_quick(&EventId::new("e5")).is_ok());
        assert!(desk.reset().is_ok());
        assert_eq!(slots(&desk, "e5"), Some(100));
        assert!(desk.bookings().is_empty());

        let (reloaded, _) = load_from(store, CorruptStatePolicy::Reseed);
        assert!(reloaded.bookings().is_empty());
    }

    #[test]
    fn failed_reset_keeps_memory_and_store() {
        let store = Arc::new(FlakyStore::default());
        let (mut desk, _) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert!(desk.register_quick(&EventId::new("e4")).is_ok());
        store.fail_writes.store(true, Ordering::SeqCst);

        let result = desk.reset();
        assert!(matches!(result, Err(RegistrationError::Persistence(_))));
        assert_eq!(slots(&desk, "e4"), Some(4));
        assert_eq!(desk.bookings().len(), 1);

        store.fail_writes.store(false, Ordering::SeqCst);
        let (reloaded, report) = load_from(store, CorruptStatePolicy::Reseed);
        assert!(matches!(report, LoadReport::Restored { bookings: 1, .. }));
        assert_eq!(slots(&reloaded, "e4"), Some(4));
    }

    #[test]
    fn receipt_uses_one_key_casing() {
        let (_, mut desk) = fresh_desk();
        let Ok(receipt) = desk.register_quick(&EventId::new("e1")) else {
            panic!("registration should succeed");
        };
        let json = serde_json::to_value(&receipt).unwrap_or_default();
        assert_eq!(json["eventName"], "Tech Entrepreneurship Talk");
        assert_eq!(json["slotsRemaining"], 24);
        assert_eq!(json["booking"]["eventId"], "e1");
        assert!(json.get("event_name").is_none());

        let confirmations = serde_json::to_value(desk.confirmations(1)).unwrap_or_default();
        assert_eq!(confirmations[0]["eventName"], "Tech Entrepreneurship Talk");
    }

    #[test]
    fn seed_is_kept_in_memory_when_first_save_fails() {
        let store = Arc::new(FlakyStore::default());
        store.fail_writes.store(true, Ordering::SeqCst);
        let (desk, report) = load_from(
            Arc::clone(&store) as Arc<dyn KeyValueStore>,
            CorruptStatePolicy::Reseed,
        );
        assert_eq!(report, LoadReport::Seeded);
        assert_eq!(desk.events().len(), 5);
        assert!(desk.bookings().is_empty());
        assert!(matches!(store.get(SNAPSHOT_KEY), Ok(None)));
    }
}
