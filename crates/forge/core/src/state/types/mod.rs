//! Core state types.
//!
//! - `common`: identifiers (item, owner, region)
//! - `sort`: item type identifiers and their classification
//! - `item`: persistent item state
mod common;
mod item;
mod sort;

pub use common::{ItemId, OwnerId, RegionId};
pub use item::{Blessing, EquipSlot, Item, ItemFlags, ItemPosition, Socket};
pub use sort::{GemGrade, ItemSort, ItemTypeId, Quality};
