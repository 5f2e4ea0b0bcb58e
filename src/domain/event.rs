//! Event record and its availability classification.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::EventId;

/// Remaining-capacity threshold above which an event counts as plentiful.
pub const LOW_AVAILABILITY_THRESHOLD: u32 = 10;

/// A schedulable activity with bounded registrant capacity.
///
/// `slots` is the remaining capacity. It is unsigned, so the non-negative
/// invariant holds by construction; the catalog only ever lowers it through
/// a checked decrement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Event {
    /// Stable event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Calendar date (`YYYY-MM-DD`).
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Display venue.
    pub venue: String,
    /// Remaining capacity.
    pub slots: u32,
}

impl Event {
    /// Creates a new event record.
    #[must_use]
    pub fn new(
        id: impl Into<EventId>,
        name: impl Into<String>,
        date: NaiveDate,
        venue: impl Into<String>,
        slots: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            venue: venue.into(),
            slots,
        }
    }

    /// Returns `true` when no capacity remains.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.slots == 0
    }

    /// Classifies the remaining capacity.
    #[must_use]
    pub const fn availability(&self) -> Availability {
        if self.slots > LOW_AVAILABILITY_THRESHOLD {
            Availability::Ok
        } else if self.slots > 0 {
            Availability::Low
        } else {
            Availability::Full
        }
    }

    /// Badge text shown next to the event: `"<n> left"` or `"Full"`.
    #[must_use]
    pub fn badge(&self) -> String {
        if self.is_full() {
            "Full".to_string()
        } else {
            format!("{} left", self.slots)
        }
    }

    /// Label for the per-event registration action.
    #[must_use]
    pub const fn action_label(&self) -> &'static str {
        if self.is_full() {
            "Fully Booked"
        } else {
            "Register"
        }
    }
}

/// Coarse remaining-capacity bucket used for badge styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Availability {
    /// More than [`LOW_AVAILABILITY_THRESHOLD`] slots left.
    Ok,
    /// Between one and [`LOW_AVAILABILITY_THRESHOLD`] slots left.
    Low,
    /// Fully booked.
    #[serde(rename = "none")]
    Full,
}
