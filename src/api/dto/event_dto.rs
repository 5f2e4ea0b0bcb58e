//! Event DTOs for table and selector rendering.

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Availability, Event, EventId};

/// One event row with its precomputed display hints.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventView {
    /// Event identifier.
    pub id: EventId,
    /// Display name.
    pub name: String,
    /// Calendar date.
    #[schema(value_type = String, format = Date)]
    pub date: NaiveDate,
    /// Display venue.
    pub venue: String,
    /// Remaining capacity.
    pub slots: u32,
    /// Capacity bucket for badge styling.
    pub availability: Availability,
    /// Badge text (`"5 left"` or `"Full"`).
    pub badge: String,
    /// Whether a registration can still succeed.
    pub bookable: bool,
    /// Label for the per-row action button.
    pub action_label: String,
}

impl From<&Event> for EventView {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            date: event.date,
            venue: event.venue.clone(),
            slots: event.slots,
            availability: event.availability(),
            badge: event.badge(),
            bookable: !event.is_full(),
            action_label: event.action_label().to_string(),
        }
    }
}

/// Response body for event list endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct EventListResponse {
    /// Events in display order.
    pub data: Vec<EventView>,
}

impl From<&[Event]> for EventListResponse {
    fn from(events: &[Event]) -> Self {
        Self {
            data: events.iter().map(EventView::from).collect(),
        }
    }
}
