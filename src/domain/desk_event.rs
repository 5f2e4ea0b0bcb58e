//! State-change notifications emitted by the registration desk.
//!
//! Every committed change publishes a [`DeskEvent`] through the
//! [`super::EventBus`] so UI adapters know when to re-render.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BookingId, EventId};

/// Why the desk state was reinitialised from the seed.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetReason {
    /// Administrative reset requested by an operator.
    Requested,
}

/// Domain event emitted after every committed state change.
#[derive(Debug, Clone, Serialize)]
#[serde(
    tag = "eventType",
    rename_all = "snake_case",
    rename_all_fields = "camelCase"
)]
pub enum DeskEvent {
    /// A registration was recorded and persisted.
    BookingCreated {
        /// New booking.
        booking_id: BookingId,
        /// Event the slot was taken on.
        event_id: EventId,
        /// Event display name.
        event_name: String,
        /// Capacity left after this booking.
        slots_remaining: u32,
        /// Commit timestamp.
        timestamp: DateTime<Utc>,
    },

    /// The last slot of an event was taken.
    EventFull {
        /// Event that is now fully booked.
        event_id: EventId,
        /// Timestamp of the booking that filled it.
        timestamp: DateTime<Utc>,
    },

    /// Events and bookings were replaced by the seed data.
    StateReset {
        /// What triggered the reset.
        reason: ResetReason,
        /// Reset timestamp.
        timestamp: DateTime<Utc>,
    },
}

impl DeskEvent {
    /// Returns the event id this notification concerns, or `None` for
    /// desk-wide notifications.
    #[must_use]
    pub const fn event_id(&self) -> Option<&EventId> {
        match self {
            Self::BookingCreated { event_id, .. } | Self::EventFull { event_id, .. } => {
                Some(event_id)
            }
            Self::StateReset { .. } => None,
        }
    }

    /// Returns the notification type as a static string slice.
    #[must_use]
    pub const fn event_type_str(&self) -> &'static str {
        match self {
            Self::BookingCreated { .. } => "booking_created",
            Self::EventFull { .. } => "event_full",
            Self::StateReset { .. } => "state_reset",
        }
    }
}
