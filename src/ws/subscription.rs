//! Per-connection subscription manager.
//!
//! Tracks which events a WebSocket client follows and filters desk
//! notifications on the server side.

use std::collections::HashSet;

use crate::domain::EventId;

/// Manages the set of event subscriptions for a single connection.
#[derive(Debug, Default)]
pub struct SubscriptionManager {
    /// Subscribed event ids. Ignored when `subscribe_all` is set.
    event_ids: HashSet<EventId>,
    /// Whether the client follows every event (wildcard `"*"`).
    subscribe_all: bool,
}

impl SubscriptionManager {
    /// Creates a new empty subscription manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds event ids to the subscription set. `"*"` enables the wildcard.
    pub fn subscribe(&mut self, ids: &[EventId], wildcard: bool) {
        if wildcard {
            self.subscribe_all = true;
        }
        self.event_ids.extend(ids.iter().cloned());
    }

    /// Removes event ids from the subscription set.
    pub fn unsubscribe(&mut self, ids: &[EventId]) {
        for id in ids {
            self.event_ids.remove(id);
        }
    }

    /// Returns `true` if a notification about `event_id` should be
    /// forwarded. Desk-wide notifications (`None`) reach every client with
    /// at least one subscription.
    #[must_use]
    pub fn matches(&self, event_id: Option<&EventId>) -> bool {
        match event_id {
            Some(id) => self.subscribe_all || self.event_ids.contains(id),
            None => self.subscribe_all || !self.event_ids.is_empty(),
        }
    }

    /// Returns the number of explicitly subscribed event ids.
    #[must_use]
    pub fn count(&self) -> usize {
        self.event_ids.len()
    }

    /// Returns `true` if the wildcard subscription is active.
    #[must_use]
    pub fn is_subscribed_all(&self) -> bool {
        self.subscribe_all
    }
}
