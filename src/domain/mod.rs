//! Domain layer: events, bookings, capacity tracking and notifications.
//!
//! This module contains the registration model: typed identifiers, the
//! event catalog with its capacity invariant, the append-only booking
//! ledger, form validation, the injected id/clock capabilities, and the
//! event bus used to announce committed changes.

pub mod booking;
pub mod catalog;
pub mod desk_event;
pub mod environment;
pub mod event;
pub mod event_bus;
pub mod ids;
pub mod ledger;
pub mod notice;
pub mod seed;
pub mod validation;

pub use booking::Booking;
pub use catalog::EventCatalog;
pub use desk_event::{DeskEvent, ResetReason};
pub use environment::{
    Clock, FixedClock, IdGenerator, SequentialIdGenerator, SystemClock, UuidGenerator,
};
pub use event::{Availability, Event};
pub use event_bus::EventBus;
pub use ids::{BookingId, EventId};
pub use ledger::BookingLedger;
pub use notice::{INVALID_FORM_NOTICE, RegistrationMode};
pub use validation::{
    FieldError, FormField, RegistrationForm, ValidRegistration, ValidationErrors,
};
