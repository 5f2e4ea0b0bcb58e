//! Booking record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{BookingId, EventId};

/// Registrant name recorded for one-click registrations.
pub const QUICK_REGISTER_NAME: &str = "Quick Register";

/// Student id recorded for one-click registrations.
pub const QUICK_REGISTER_STUDENT_ID: &str = "N/A";

/// A single registrant's claim on one slot of an event.
///
/// Immutable once created. `event_id` may point at an event that is no
/// longer in the catalog, so lookups through it must tolerate a miss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Unique booking identifier.
    pub id: BookingId,
    /// Event the slot was taken on.
    pub event_id: EventId,
    /// Registrant name.
    pub name: String,
    /// Registrant student id.
    pub student_id: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl Booking {
    /// Returns `true` if this booking came from a one-click registration.
    #[must_use]
    pub fn is_quick(&self) -> bool {
        self.name == QUICK_REGISTER_NAME && self.student_id == QUICK_REGISTER_STUDENT_ID
    }
}
