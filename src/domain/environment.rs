//! Injected capabilities: booking id generation and wall-clock time.
//!
//! Both are traits so the desk can be driven deterministically in tests
//! with [`SequentialIdGenerator`] and [`FixedClock`].

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};

use super::BookingId;

/// Source of fresh booking identifiers.
pub trait IdGenerator: Send + Sync + fmt::Debug {
    /// Returns an identifier not returned before.
    fn next(&self) -> BookingId;
}

/// Source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Random UUID v4 identifiers.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
    fn next(&self) -> BookingId {
        BookingId::new()
    }
}

/// Predictable identifiers `00000000-0000-0000-0000-000000000001`, `...02`, ...
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    counter: AtomicU64,
}

impl SequentialIdGenerator {
    /// Creates a generator whose first id is `1`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next(&self) -> BookingId {
        let n = self.counter.fetch_add(1, Ordering::Relaxed).saturating_add(1);
        BookingId::from_uuid(uuid::Uuid::from_u128(u128::from(n)))
    }
}

/// System wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at a single instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    time: DateTime<Utc>,
}

impl FixedClock {
    /// Creates a clock that always returns `time`.
    #[must_use]
    pub const fn new(time: DateTime<Utc>) -> Self {
        Self { time }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.time
    }
}
