//! Canonical forge state: the items visible to one scheduling partition.
//!
//! [`ForgeState`] is owned by exactly one worker. The engine reads it through a
//! shared borrow and describes its effect as an [`ItemDelta`]; the owner of the
//! state applies the delta once it has been persisted.
mod delta;
pub mod types;

use std::collections::BTreeMap;

pub use delta::ItemDelta;
pub use types::{
    Blessing, EquipSlot, GemGrade, Item, ItemFlags, ItemId, ItemPosition, ItemSort, ItemTypeId,
    OwnerId, Quality, RegionId, Socket,
};

/// Items of a region plus the values seeding its deterministic rolls.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForgeState {
    /// Base seed mixed into every chance roll of this partition.
    pub seed: u64,

    /// Number of committed requests; advances the roll seeds.
    pub nonce: u64,

    items: BTreeMap<ItemId, Item>,
}

impl ForgeState {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            nonce: 0,
            items: BTreeMap::new(),
        }
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.items.contains_key(&id)
    }

    /// Inserts or replaces an item, returning the previous record.
    pub fn insert(&mut self, item: Item) -> Option<Item> {
        self.items.insert(item.id, item)
    }

    pub fn remove(&mut self, id: ItemId) -> Option<Item> {
        self.items.remove(&id)
    }

    /// Iterates the items of one owner in id order.
    pub fn items_of(&self, owner: OwnerId) -> impl Iterator<Item = &Item> + '_ {
        self.items.values().filter(move |item| item.owner == owner)
    }

    /// Drops every item of an owner (owner left the partition).
    pub fn evict_owner(&mut self, owner: OwnerId) -> usize {
        let before = self.items.len();
        self.items.retain(|_, item| item.owner != owner);
        before - self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Applies a persisted delta and advances the nonce.
    pub fn commit(&mut self, delta: &ItemDelta) {
        for id in &delta.removed {
            self.items.remove(id);
        }
        for item in delta.updated.iter().chain(&delta.created) {
            self.items.insert(item.id, item.clone());
        }
        self.nonce += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commit_applies_every_section_and_advances_nonce() {
        let owner = OwnerId(7);
        let mut state = ForgeState::new(42);
        state.insert(Item::new(ItemId(1), owner, ItemTypeId(410_339), 3000));
        state.insert(Item::new(ItemId(2), owner, ItemTypeId(1_088_000), 100));

        let mut target = state.item(ItemId(1)).cloned().expect("target");
        target.tier = 3;
        let delta = ItemDelta {
            owner,
            updated: vec![target],
            created: vec![Item::new(ItemId(9), owner, ItemTypeId(1_088_000), 100)],
            removed: vec![ItemId(2)],
        };

        state.commit(&delta);

        assert_eq!(state.nonce, 1);
        assert_eq!(state.item(ItemId(1)).map(|i| i.tier), Some(3));
        assert!(!state.contains(ItemId(2)));
        assert!(state.contains(ItemId(9)));
        assert_eq!(state.items_of(owner).count(), 2);
    }

    #[test]
    fn evict_owner_keeps_other_owners() {
        let mut state = ForgeState::new(0);
        state.insert(Item::new(ItemId(1), OwnerId(1), ItemTypeId(410_339), 3000));
        state.insert(Item::new(ItemId(2), OwnerId(2), ItemTypeId(410_339), 3000));

        assert_eq!(state.evict_owner(OwnerId(1)), 1);
        assert!(state.contains(ItemId(2)));
    }
}
