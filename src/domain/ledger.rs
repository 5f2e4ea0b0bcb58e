//! Append-only ordered collection of bookings.

use chrono::{DateTime, Utc};

use super::{Booking, BookingId, EventId};

/// Bookings in creation order.
///
/// The ledger never checks capacity; the desk only appends after the
/// matching [`super::EventCatalog::decrement`] succeeded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    /// Creates a ledger from previously persisted bookings.
    #[must_use]
    pub const fn new(bookings: Vec<Booking>) -> Self {
        Self { bookings }
    }

    /// Records a new booking and returns a copy of it.
    pub fn append(
        &mut self,
        id: BookingId,
        event_id: EventId,
        name: impl Into<String>,
        student_id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Booking {
        let booking = Booking {
            id,
            event_id,
            name: name.into(),
            student_id: student_id.into(),
            created_at,
        };
        self.bookings.push(booking.clone());
        booking
    }

    /// Drops the most recent booking. Used to undo an append whose
    /// registration could not be persisted.
    pub(crate) fn discard_last(&mut self) -> Option<Booking> {
        self.bookings.pop()
    }

    /// Returns up to `n` of the latest bookings, most recent first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings.iter().rev().take(n)
    }

    /// Returns every booking in creation order.
    #[must_use]
    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// Returns the number of bookings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bookings.len()
    }

    /// Returns `true` if nothing has been booked yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bookings.is_empty()
    }
}
