//! Topic-based event bus for runtime events.
//!
//! Events are published to specific topics, and consumers subscribe only to
//! the topics they need: a session gateway listens on [`Topic::Owner`] to push
//! item updates to players, a chat relay listens on [`Topic::World`].

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{OwnerEvent, WorldEvent};
