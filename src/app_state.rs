//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::config::{RegistrationConfig, StoreBackend};
use crate::domain::{EventBus, SystemClock, UuidGenerator};
use crate::error::RegistrationError;
use crate::persistence::{FileStore, KeyValueStore, MemoryStore, SnapshotRepository};
use crate::service::{LoadReport, RegistrationDesk, RegistrationService};

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Registration service for all desk operations.
    pub registration_service: Arc<RegistrationService>,
    /// Event bus for WebSocket subscriptions.
    pub event_bus: EventBus,
}

impl AppState {
    /// Wraps an already-built service.
    #[must_use]
    pub fn new(registration_service: RegistrationService) -> Self {
        let event_bus = registration_service.event_bus().clone();
        Self {
            registration_service: Arc::new(registration_service),
            event_bus,
        }
    }

    /// Opens the configured store, loads the desk and builds the service
    /// with random booking ids and the system clock.
    ///
    /// # Errors
    ///
    /// Returns [`RegistrationError::Persistence`] if the file store cannot
    /// be opened, or [`RegistrationError::CorruptState`] if the snapshot is
    /// unreadable and reseeding is disabled.
    pub fn from_config(config: &RegistrationConfig) -> Result<(Self, LoadReport), RegistrationError> {
        let store: Arc<dyn KeyValueStore> = match config.store_backend {
            StoreBackend::File => Arc::new(FileStore::open(&config.data_dir)?),
            StoreBackend::Memory => Arc::new(MemoryStore::new()),
        };

        let (desk, report) = RegistrationDesk::load(
            SnapshotRepository::new(store),
            Arc::new(UuidGenerator),
            Arc::new(SystemClock),
            config.corrupt_state_policy,
        )?;

        let event_bus = EventBus::new(config.event_bus_capacity);
        let service = RegistrationService::new(desk, event_bus, config.recent_bookings_limit);
        Ok((Self::new(service), report))
    }
}
