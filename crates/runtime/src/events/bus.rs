//! Topic-based event bus implementation.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use forge_core::OwnerId;

use super::types::{OwnerEvent, WorldEvent};

/// Topics for event routing
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Topic {
    /// Per-owner notifications (item snapshots, rejection notices)
    Owner,
    /// World broadcasts (milestone announcements)
    World,
}

/// Event wrapper that carries the topic and typed event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Owner(OwnerEvent),
    World(WorldEvent),
}

impl Event {
    pub fn topic(&self) -> Topic {
        match self {
            Event::Owner(_) => Topic::Owner,
            Event::World(_) => Topic::World,
        }
    }

    /// Owner an event is addressed to, `None` for world broadcasts.
    pub fn owner(&self) -> Option<OwnerId> {
        match self {
            Event::Owner(event) => Some(event.owner()),
            Event::World(_) => None,
        }
    }
}

/// Topic-based event bus
///
/// Cloning the bus shares the underlying channels. Publishing is best-effort:
/// an event published while nobody listens is dropped.
#[derive(Clone)]
pub struct EventBus {
    owner: broadcast::Sender<Event>,
    world: broadcast::Sender<Event>,
}

impl EventBus {
    /// Creates a new event bus with default capacity for each topic
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Creates a new event bus with specified capacity per topic
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            owner: broadcast::channel(capacity).0,
            world: broadcast::channel(capacity).0,
        }
    }

    fn sender(&self, topic: Topic) -> &broadcast::Sender<Event> {
        match topic {
            Topic::Owner => &self.owner,
            Topic::World => &self.world,
        }
    }

    /// Publish an event to its corresponding topic
    pub fn publish(&self, event: Event) {
        let topic = event.topic();
        if self.sender(topic).send(event).is_err() {
            // No subscribers for this topic - this is normal, not an error
            tracing::trace!(target: "forge::events", ?topic, "No subscribers for topic");
        }
    }

    /// Subscribe to a specific topic
    ///
    /// Returns a receiver that will only receive events for that topic.
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.sender(topic).subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_are_routed_by_topic() {
        let bus = EventBus::new();
        let mut owner_rx = bus.subscribe(Topic::Owner);
        let mut world_rx = bus.subscribe(Topic::World);

        bus.publish(Event::World(WorldEvent::announcement("hello")));

        assert!(owner_rx.try_recv().is_err());
        let event = world_rx.try_recv().expect("world event");
        assert_eq!(event.topic(), Topic::World);
        assert_eq!(event.owner(), None);
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        let bus = EventBus::with_capacity(4);
        bus.publish(Event::World(WorldEvent::announcement("nobody listens")));
    }
}
