//! Broadcast channel for desk notifications.
//!
//! [`EventBus`] wraps a [`tokio::sync::broadcast`] channel. Every committed
//! registration or reset publishes a [`DeskEvent`], and each WebSocket
//! connection subscribes to receive the ones it asked for.

use tokio::sync::broadcast;

use super::DeskEvent;

/// Broadcast bus for [`DeskEvent`]s.
///
/// When the ring buffer is full, the oldest notifications are dropped for
/// lagging receivers.
#[derive(Debug, Clone)]
pub struct EventBus {
    sender: broadcast::Sender<DeskEvent>,
}

impl EventBus {
    /// Creates a new `EventBus` with the given channel capacity.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Publishes a notification to all subscribers.
    ///
    /// Returns the number of receivers that got it; with no receivers the
    /// notification is dropped.
    pub fn publish(&self, event: DeskEvent) -> usize {
        self.sender.send(event).unwrap_or(0)
    }

    /// Creates a new receiver for all future notifications.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<DeskEvent> {
        self.sender.subscribe()
    }

    /// Returns the current number of active receivers.
    #[must_use]
    pub fn receiver_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
