//! Repository layer for persistent item state.
//!
//! Repositories hold data that CHANGES through enhancement:
//! - Item records per owner (loaded when an owner attaches to a region worker)
//! - Change sets committed atomically per request
//!
//! Static reference data (item types, anti-cheat list) is handled by oracles,
//! not repositories.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileItemRepository;
pub use memory::InMemoryItemRepository;
pub use traits::ItemRepository;
