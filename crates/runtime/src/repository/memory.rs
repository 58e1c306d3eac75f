//! In-memory ItemRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use forge_core::{Item, ItemDelta, ItemId, OwnerId};

use super::traits::validate_delta;
use super::{ItemRepository, RepositoryError, Result};

/// In-memory implementation of ItemRepository.
///
/// Keeps every item in one id-ordered map; a commit holds the write lock for
/// the whole change set.
#[derive(Default)]
pub struct InMemoryItemRepository {
    items: RwLock<BTreeMap<ItemId, Item>>,
}

impl InMemoryItemRepository {
    /// Create a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with an initial set of items.
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        Self {
            items: RwLock::new(items.into_iter().map(|item| (item.id, item)).collect()),
        }
    }

    /// Snapshot of a single stored item.
    pub fn get(&self, id: ItemId) -> Result<Option<Item>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.get(&id).cloned())
    }

    /// Number of stored items.
    pub fn len(&self) -> Result<usize> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.len())
    }
}

impl ItemRepository for InMemoryItemRepository {
    fn load_owner(&self, owner: OwnerId) -> Result<Vec<Item>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items
            .values()
            .filter(|item| item.owner == owner)
            .cloned()
            .collect())
    }

    fn commit(&self, delta: &ItemDelta) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        validate_delta(delta, |id| items.get(&id).map(|item| item.owner))?;

        for id in &delta.removed {
            items.remove(id);
        }
        for item in delta.updated.iter().chain(&delta.created) {
            items.insert(item.id, item.clone());
        }
        Ok(())
    }

    fn max_item_id(&self) -> Result<Option<ItemId>> {
        let items = self
            .items
            .read()
            .map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(items.keys().next_back().copied())
    }
}

#[cfg(test)]
mod tests {
    use forge_core::ItemTypeId;

    use super::*;

    fn item(id: u32, owner: u32) -> Item {
        Item::new(ItemId(id), OwnerId(owner), ItemTypeId(410_335), 3000)
    }

    #[test]
    fn commit_applies_removed_then_written_items() {
        let repo = InMemoryItemRepository::with_items([item(1, 1), item(2, 1), item(3, 2)]);

        let delta = ItemDelta {
            owner: OwnerId(1),
            updated: vec![item(1, 1).with_tier(4)],
            created: vec![item(9, 1)],
            removed: vec![ItemId(2)],
        };
        repo.commit(&delta).expect("commit");

        let owned = repo.load_owner(OwnerId(1)).expect("load");
        let ids: Vec<_> = owned.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(1), ItemId(9)]);
        assert_eq!(owned[0].tier, 4);
        assert_eq!(repo.max_item_id().expect("max"), Some(ItemId(9)));
    }

    #[test]
    fn store_refuses_foreign_items() {
        let repo = InMemoryItemRepository::new();
        let err = repo
            .store(OwnerId(1), &[item(1, 1), item(2, 2)])
            .expect_err("foreign item");
        assert!(matches!(err, RepositoryError::OwnerMismatch { .. }));
        assert_eq!(repo.len().expect("len"), 0);
    }

    #[test]
    fn commit_rejects_spent_or_foreign_consumables() {
        let repo = InMemoryItemRepository::with_items([item(1, 1), item(2, 1), item(3, 2)]);

        let missing = ItemDelta {
            owner: OwnerId(1),
            updated: vec![item(1, 1).with_tier(4)],
            created: Vec::new(),
            removed: vec![ItemId(7)],
        };
        let err = repo.commit(&missing).expect_err("missing consumable");
        assert!(matches!(err, RepositoryError::MissingItem(ItemId(7))));

        let foreign = ItemDelta {
            removed: vec![ItemId(2), ItemId(3)],
            ..missing.clone()
        };
        let err = repo.commit(&foreign).expect_err("foreign consumable");
        assert!(matches!(
            err,
            RepositoryError::OwnerMismatch {
                item: ItemId(3),
                actual: OwnerId(2),
                ..
            }
        ));

        // nothing of either delta was applied
        assert_eq!(repo.get(ItemId(1)).expect("get").map(|i| i.tier), Some(0));
        assert_eq!(repo.len().expect("len"), 3);
    }

    #[test]
    fn commit_rejects_reused_ids() {
        let repo = InMemoryItemRepository::with_items([item(1, 1)]);
        let err = repo
            .store(OwnerId(1), &[item(1, 1)])
            .expect_err("duplicate id");
        assert!(matches!(err, RepositoryError::DuplicateItem(ItemId(1))));
    }
}
