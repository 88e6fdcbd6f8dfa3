//! Subscriber fan-out.
//!
//! The engine publishes one `Notification` per completed operation. A
//! failed operation publishes nothing, so subscribers only ever see
//! states the engine actually reached.

use serde::{Deserialize, Serialize};

use super::event::GameEvent;
use crate::core::Command;
use crate::engine::GameSnapshot;

/// Everything one completed operation produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Session-wide sequence number, starting at 1.
    pub sequence: u64,

    /// The operation that completed.
    pub command: Command,

    /// Events in the order they happened.
    pub events: Vec<GameEvent>,

    /// State after the operation.
    pub snapshot: GameSnapshot,
}

/// Receives notifications.
///
/// Implemented for any `FnMut(&Notification) + Send` closure.
pub trait Subscriber: Send {
    /// Called once per completed operation.
    fn notify(&mut self, notification: &Notification);
}

impl<F> Subscriber for F
where
    F: FnMut(&Notification) + Send,
{
    fn notify(&mut self, notification: &Notification) {
        self(notification);
    }
}

/// Handle returned by `EventBus::subscribe`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(pub u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Ordered list of subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Box<dyn Subscriber>)>,
    next_id: u32,
}

impl EventBus {
    /// Create an empty bus.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscriber. Subscribers are notified in subscription order.
    pub fn subscribe(&mut self, subscriber: impl Subscriber + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Remove a subscriber. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver a notification to every subscriber.
    pub fn publish(&mut self, notification: &Notification) {
        for (_, subscriber) in &mut self.subscribers {
            subscriber.notify(notification);
        }
    }

    /// Number of subscribers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Check if nobody is subscribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
