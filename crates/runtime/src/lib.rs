//! Runtime orchestration for the item forge.
//!
//! This crate wires together oracle access, repositories, the session
//! directory and region workers into a cohesive runtime API. Hosts embed
//! [`Runtime`] to submit enhancement requests, subscribe to events, and query
//! item snapshots through [`RuntimeHandle`].
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides the topic-based event bus (owner and world topics)
//! - [`workers`] keeps the region workers internal to the crate
//! - [`oracle`], [`repository`] and [`session`] provide adapters reused by
//!   other crates
pub mod api;
pub mod events;
pub mod oracle;
pub mod repository;
pub mod runtime;
pub mod session;

mod workers;

pub use api::{EnhanceReply, Result, RuntimeError, RuntimeHandle};
pub use events::{Event, EventBus, OwnerEvent, Topic, WorldEvent};
pub use oracle::{ItemTypeOracleImpl, OracleManager, SequentialIdAllocator, SuspicionOracleImpl};
pub use repository::{
    FileItemRepository, InMemoryItemRepository, ItemRepository, RepositoryError,
};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig};
pub use session::{InMemorySessionDirectory, SessionDirectory};
