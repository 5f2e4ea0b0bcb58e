//! Registration service: serialises desk access and emits notifications.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use super::desk::{Confirmation, Receipt, RegistrationDesk};
use crate::domain::{
    DeskEvent, Event, EventBus, EventId, FieldError, RegistrationForm, ResetReason,
};
use crate::error::RegistrationError;

/// Orchestration layer for the UI-facing registration contract.
///
/// Owns the single [`RegistrationDesk`] behind a mutex so that each
/// registration's decrement, append and save run under one lock
/// acquisition. Every committed change is published on the [`EventBus`]
/// after the lock is released.
#[derive(Debug, Clone)]
pub struct RegistrationService {
    desk: Arc<Mutex<RegistrationDesk>>,
    event_bus: EventBus,
    recent_limit: usize,
}

impl RegistrationService {
    /// Creates a new `RegistrationService`.
    ///
    /// `recent_limit` is the default length of the recent-bookings view.
    #[must_use]
    pub fn new(desk: RegistrationDesk, event_bus: EventBus, recent_limit: usize) -> Self {
        Self {
            desk: Arc::new(Mutex::new(desk)),
            event_bus,
            recent_limit,
        }
    }

    /// Returns a reference to the inner [`EventBus`].
    #[must_use]
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Default number of bookings in the recent view.
    #[must_use]
    pub const fn recent_limit(&self) -> usize {
        self.recent_limit
    }

    /// Returns all events in display order.
    pub async fn list_events(&self) -> Vec<Event> {
        self.desk.lock().await.events().to_vec()
    }

    /// Returns a single event.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::EventNotFound`] for an unknown id.
    pub async fn find_event(&self, id: &EventId) -> Result<Event, RegistrationError> {
        self.desk
            .lock()
            .await
            .find_event(id)
            .cloned()
            .ok_or_else(|| RegistrationError::EventNotFound(id.clone()))
    }

    /// Returns up to `n` latest bookings with event names, newest first.
    pub async fn list_recent_bookings(&self, n: usize) -> Vec<Confirmation> {
        self.desk.lock().await.confirmations(n)
    }

    /// One-click registration.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::CapacityExhausted`] when the event is
    /// full or unknown, or [`RegistrationError::Persistence`] when the save
    /// fails.
    pub async fn register_quick(&self, event_id: &EventId) -> Result<Receipt, RegistrationError> {
        let event_id = event_id.clone();
        let receipt = self
            .run_blocking(move |desk| desk.register_quick(&event_id))
            .await?;
        self.announce(&receipt);
        Ok(receipt)
    }

    /// Form registration with name and student id.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Validation`] for invalid input, or the
    /// same errors as [`Self::register_quick`].
    pub async fn register_with_details(
        &self,
        form: &RegistrationForm,
    ) -> Result<Receipt, RegistrationError> {
        let form = form.clone();
        let receipt = self
            .run_blocking(move |desk| desk.register_with_details(&form))
            .await?;
        self.announce(&receipt);
        Ok(receipt)
    }

    /// Runs the form predicates without touching state.
    ///
    /// Returns the failing fields; an empty list means the form is valid.
    #[must_use]
    pub fn validate(&self, form: &RegistrationForm) -> Vec<FieldError> {
        match form.validate() {
            Ok(_) => Vec::new(),
            Err(errors) => errors.fields().to_vec(),
        }
    }

    /// Resets the desk to the default events and an empty ledger.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the store cannot be
    /// cleared or rewritten.
    pub async fn reset(&self) -> Result<Vec<Event>, RegistrationError> {
        let events = self
            .run_blocking(|desk| {
                desk.reset()?;
                Ok(desk.events().to_vec())
            })
            .await?;

        let _ = self.event_bus.publish(DeskEvent::StateReset {
            reason: ResetReason::Requested,
            timestamp: Utc::now(),
        });

        Ok(events)
    }

    /// Runs a mutating desk operation on the blocking pool while holding
    /// the desk lock, so store writes never stall a runtime worker.
    async fn run_blocking<T, F>(&self, op: F) -> Result<T, RegistrationError>
    where
        F: FnOnce(&mut RegistrationDesk) -> Result<T, RegistrationError> + Send + 'static,
        T: Send + 'static,
    {
        let mut desk = Arc::clone(&self.desk).lock_owned().await;
        tokio::task::spawn_blocking(move || op(&mut desk))
            .await
            .map_err(|e| RegistrationError::Internal(format!("desk task failed: {e}")))?
    }

    fn announce(&self, receipt: &Receipt) {
        let event_id = receipt.booking.event_id.clone();
        let _ = self.event_bus.publish(DeskEvent::BookingCreated {
            booking_id: receipt.booking.id,
            event_id: event_id.clone(),
            event_name: receipt.event_name.clone(),
            slots_remaining: receipt.slots_remaining,
            timestamp: receipt.booking.created_at,
        });

        if receipt.slots_remaining == 0 {
            tracing::info!(%event_id, "event is now fully booked");
            let _ = self.event_bus.publish(DeskEvent::EventFull {
                event_id,
                timestamp: receipt.booking.created_at,
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;
    use crate::domain::{SequentialIdGenerator, SystemClock};
    use crate::persistence::{KeyValueStore, MemoryStore, SnapshotRepository};
    use crate::service::CorruptStatePolicy;

    fn make_service() -> RegistrationService {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        let Ok((desk, _)) = RegistrationDesk::load(
            SnapshotRepository::new(store),
            Arc::new(SequentialIdGenerator::new()),
            Arc::new(SystemClock),
            CorruptStatePolicy::Reseed,
        ) else {
            panic!("desk load failed");
        };
        RegistrationService::new(desk, EventBus::new(64), 5)
    }

    #[tokio::test]
    async fn quick_register_emits_booking_created() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();

        let result = service.register_quick(&EventId::new("e1")).await;
        assert!(result.is_ok());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "booking_created");
        assert_eq!(event.event_id(), Some(&EventId::new("e1")));
    }

    #[tokio::test]
    async fn last_slot_emits_event_full() {
        let service = make_service();
        let id = EventId::new("e4");
        for _ in 0..4 {
            assert!(service.register_quick(&id).await.is_ok());
        }
        let mut rx = service.event_bus().subscribe();
        assert!(service.register_quick(&id).await.is_ok());

        let Ok(first) = rx.recv().await else {
            panic!("expected booking_created");
        };
        let Ok(second) = rx.recv().await else {
            panic!("expected event_full");
        };
        assert_eq!(first.event_type_str(), "booking_created");
        assert_eq!(second.event_type_str(), "event_full");
    }

    #[tokio::test]
    async fn rejected_registration_emits_nothing() {
        let service = make_service();
        let mut rx = service.event_bus().subscribe();
        let form = RegistrationForm::new("e3", "A", "12");
        assert!(service.register_with_details(&form).await.is_err());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_quick_registrations_never_oversell() {
        let service = make_service();
        let mut handles = Vec::new();
        for _ in 0..20 {
            let svc = service.clone();
            handles.push(tokio::spawn(async move {
                svc.register_quick(&EventId::new("e4")).await.is_ok()
            }));
        }
        let mut successes = 0;
        for handle in handles {
            if matches!(handle.await, Ok(true)) {
                successes += 1;
            }
        }
        assert_eq!(successes, 5);
        let Ok(event) = service.find_event(&EventId::new("e4")).await else {
            panic!("event missing");
        };
        assert_eq!(event.slots, 0);
        assert_eq!(service.list_recent_bookings(50).await.len(), 5);
    }

    #[tokio::test]
    async fn find_unknown_event_is_not_found() {
        let service = make_service();
        let result = service.find_event(&EventId::new("zz")).await;
        assert!(matches!(result, Err(RegistrationError::EventNotFound(_))));
    }

    #[tokio::test]
    async fn reset_emits_state_reset() {
        let service = make_service();
        assert!(service.register_quick(&EventId::new("e2")).await.is_ok());
        let mut rx = service.event_bus().subscribe();

        let Ok(events) = service.reset().await else {
            panic!("reset failed");
        };
        assert_eq!(events.len(), 5);
        assert!(service.list_recent_bookings(5).await.is_empty());

        let Ok(event) = rx.recv().await else {
            panic!("expected event");
        };
        assert_eq!(event.event_type_str(), "state_reset");
    }

    #[test]
    fn validate_reports_fields_without_state() {
        let service = make_service();
        assert!(service.validate(&RegistrationForm::new("e1", "Jo", "1234567")).is_empty());
        assert_eq!(
            service.validate(&RegistrationForm::new("", "Jo", "1234567")).len(),
            1
        );
    }
}
