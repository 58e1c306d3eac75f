//! Repository contract for loading and committing item state.

use forge_core::{Item, ItemDelta, ItemId, OwnerId};

use super::{RepositoryError, Result};

/// Checks a change set against the stored items before anything is written.
///
/// `stored` returns the owner of a stored item. Removed and updated items must
/// exist and belong to the delta owner; created items must not exist yet. A
/// delta computed from a stale cache fails here instead of spending a
/// consumable twice.
pub(crate) fn validate_delta(
    delta: &ItemDelta,
    stored: impl Fn(ItemId) -> Option<OwnerId>,
) -> Result<()> {
    let owner = delta.owner;
    let mismatch = |item: ItemId, actual: OwnerId| RepositoryError::OwnerMismatch {
        item,
        expected: owner,
        actual,
    };

    for item in delta.updated.iter().chain(&delta.created) {
        if item.owner != owner {
            return Err(mismatch(item.id, item.owner));
        }
    }
    for id in delta
        .removed
        .iter()
        .copied()
        .chain(delta.updated.iter().map(|item| item.id))
    {
        match stored(id) {
            None => return Err(RepositoryError::MissingItem(id)),
            Some(actual) if actual != owner => return Err(mismatch(id, actual)),
            Some(_) => {}
        }
    }
    if let Some(item) = delta.created.iter().find(|item| stored(item.id).is_some()) {
        return Err(RepositoryError::DuplicateItem(item.id));
    }
    Ok(())
}

/// Durable item store.
///
/// Every change set produced by one request is committed as a unit: either
/// all of `updated`, `created` and `removed` become durable, or none of them.
/// Region workers apply a delta to their cache only after `commit` succeeds.
pub trait ItemRepository: Send + Sync {
    /// Load every item of an owner, in id order.
    fn load_owner(&self, owner: OwnerId) -> Result<Vec<Item>>;

    /// Atomically apply a change set.
    ///
    /// The whole delta is rejected when it removes or updates an item that is
    /// missing or owned by someone else, or creates an id already stored.
    fn commit(&self, delta: &ItemDelta) -> Result<()>;

    /// Highest item id ever stored, used to seed the id allocator.
    fn max_item_id(&self) -> Result<Option<ItemId>>;

    /// Store items created outside the forge (drops, purchases, fixtures).
    fn store(&self, owner: OwnerId, items: &[Item]) -> Result<()> {
        if let Some(item) = items.iter().find(|item| item.owner != owner) {
            return Err(RepositoryError::OwnerMismatch {
                item: item.id,
                expected: owner,
                actual: item.owner,
            });
        }
        let delta = ItemDelta {
            created: items.to_vec(),
            ..ItemDelta::new(owner)
        };
        self.commit(&delta)
    }
}
