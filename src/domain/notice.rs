//! User-facing notice wording for registration outcomes.

use super::Booking;

/// Notice shown when a submitted form has invalid fields.
pub const INVALID_FORM_NOTICE: &str = "Please fix the highlighted fields.";

/// How a registration was requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    /// One-click registration from the events table.
    Quick,
    /// Full form with name and student id.
    Form,
}

impl RegistrationMode {
    /// Notice shown when the event has no capacity left.
    #[must_use]
    pub const fn full_notice(self) -> &'static str {
        match self {
            Self::Quick => "Sorry, that event is fully booked.",
            Self::Form => "That event is fully booked. Please pick another.",
        }
    }

    /// Notice shown after a successful registration.
    #[must_use]
    pub fn success_notice(self, booking: &Booking, event_name: &str) -> String {
        match self {
            Self::Quick => format!("Success! Reserved 1 slot for \"{event_name}\"."),
            Self::Form => format!(
                "Registered {} (ID: {}) for \"{event_name}\".",
                booking.name, booking.student_id
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BookingId, EventId};
    use chrono::Utc;

    #[test]
    fn success_wording() {
        let booking = Booking {
            id: BookingId::new(),
            event_id: EventId::new("e2"),
            name: "Jane Doe".to_string(),
            student_id: "1234567".to_string(),
            created_at: Utc::now(),
        };
        assert_eq!(
            RegistrationMode::Form.success_notice(&booking, "AI in Healthcare Panel"),
            "Registered Jane Doe (ID: 1234567) for \"AI in Healthcare Panel\"."
        );
        assert_eq!(
            RegistrationMode::Quick.success_notice(&booking, "Lab"),
            "Success! Reserved 1 slot for \"Lab\"."
        );
    }
}
