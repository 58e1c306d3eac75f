//! Worker tasks that back the runtime orchestration.
//!
//! Each region worker owns the item cache of the owners attached to it and
//! processes their commands one at a time.

mod announce;
mod region;

pub use region::{Command, RegionWorker};
