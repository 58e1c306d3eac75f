//! Resource ledger: validates, selects and spends request-supplied consumables.
//!
//! # Lifecycle
//!
//! 1. [`Ledger::open`] validates every candidate id before anything is spent.
//!    One failing candidate rejects the whole request.
//! 2. Protocols [`select`](Ledger::select) the qualifying subset with a
//!    kind-specific unit filter and choose a [`SpendPlan`].
//! 3. [`spend`](Ledger::spend) records each consumed id exactly once; rebates
//!    and conversions are recorded through [`mint`](Ledger::mint).
//! 4. The engine turns the ledger into the removed/created part of the delta.
mod material;
mod selection;

pub use material::{Material, UnitFamily};
pub use selection::{Candidate, Selection, SpendPlan};

use arrayvec::ArrayVec;

use crate::config::ForgeConfig;
use crate::enhance::{EnhanceError, SpentList, ValidationError};
use crate::env::SuspicionOracle;
use crate::error::ErrorContext;
use crate::state::{ForgeState, Item, ItemId, OwnerId};

/// Consumables of one request.
#[derive(Debug)]
pub struct Ledger<'a> {
    owner: OwnerId,
    candidates: ArrayVec<&'a Item, { ForgeConfig::MAX_CONSUMABLES }>,
    spent: SpentList,
    spent_bound: bool,
    minted: Vec<Item>,
}

impl<'a> Ledger<'a> {
    /// Validates the candidate list against the current state.
    pub fn open(
        state: &'a ForgeState,
        owner: OwnerId,
        target: ItemId,
        ids: &[ItemId],
        suspicion: &dyn SuspicionOracle,
    ) -> Result<Self, ValidationError> {
        if ids.len() > ForgeConfig::MAX_CONSUMABLES {
            return Err(ValidationError::TooManyConsumables {
                count: ids.len(),
                max: ForgeConfig::MAX_CONSUMABLES,
            });
        }

        let mut candidates: ArrayVec<&'a Item, { ForgeConfig::MAX_CONSUMABLES }> =
            ArrayVec::new();
        for &id in ids {
            if id == target {
                return Err(ValidationError::ConsumableIsTarget(id));
            }
            if candidates.iter().any(|item| item.id == id) {
                return Err(ValidationError::DuplicateConsumable(id));
            }
            let item = state
                .item(id)
                .ok_or(ValidationError::ConsumableNotFound(id))?;
            Self::validate(item, owner, suspicion)?;
            candidates.push(item);
        }

        Ok(Self {
            owner,
            candidates,
            spent: SpentList::new(),
            spent_bound: false,
            minted: Vec::new(),
        })
    }

    fn validate(
        item: &Item,
        owner: OwnerId,
        suspicion: &dyn SuspicionOracle,
    ) -> Result<(), ValidationError> {
        if item.owner != owner {
            return Err(ValidationError::ConsumableNotOwned(item.id));
        }
        if !item.position.is_inventory() {
            return Err(ValidationError::ConsumableNotInInventory(item.id));
        }
        if item.is_locked() {
            return Err(ValidationError::ConsumableLocked(item.id));
        }
        if item.is_suspicious() || suspicion.is_flagged(item.id) {
            return Err(ValidationError::ConsumableSuspicious(item.id));
        }
        Ok(())
    }

    pub fn owner(&self) -> OwnerId {
        self.owner
    }

    /// Validated candidates in request order.
    pub fn candidates(&self) -> impl Iterator<Item = &'a Item> + '_ {
        self.candidates.iter().copied()
    }

    pub fn candidate(&self, id: ItemId) -> Option<&'a Item> {
        self.candidates.iter().copied().find(|item| item.id == id)
    }

    /// Qualifying candidates that have not been spent yet, in request order.
    ///
    /// `units_of` returns the weighted contribution of a qualifying item;
    /// items it rejects or weighs at zero are left out.
    pub fn select(&self, mut units_of: impl FnMut(&Item) -> Option<u32>) -> Selection {
        self.candidates
            .iter()
            .filter(|item| !self.is_spent(item.id))
            .filter_map(|item| {
                let units = units_of(item).filter(|&u| u > 0)?;
                Some(Candidate {
                    id: item.id,
                    units,
                    bound: item.is_bound(),
                })
            })
            .collect()
    }

    pub fn is_spent(&self, id: ItemId) -> bool {
        self.spent.contains(&id)
    }

    /// Consumes one validated candidate.
    pub fn spend(&mut self, id: ItemId) -> Result<&'a Item, EnhanceError> {
        if self.is_spent(id) {
            return Err(EnhanceError::DoubleSpend(id));
        }
        let item = self.candidate(id).ok_or_else(|| {
            EnhanceError::invariant(
                "spent consumable was never validated",
                ErrorContext::default()
                    .with_owner(self.owner)
                    .with_item(id),
            )
        })?;
        self.spent
            .try_push(id)
            .map_err(|_| EnhanceError::DoubleSpend(id))?;
        self.spent_bound |= item.is_bound();
        Ok(item)
    }

    /// Consumes every candidate of a selection.
    pub fn spend_all(&mut self, selection: &Selection) -> Result<(), EnhanceError> {
        for candidate in selection.iter() {
            self.spend(candidate.id)?;
        }
        Ok(())
    }

    /// Records an item created by this request.
    pub fn mint(&mut self, item: Item) {
        self.minted.push(item);
    }

    pub fn spent(&self) -> &[ItemId] {
        &self.spent
    }

    pub fn minted(&self) -> &[Item] {
        &self.minted
    }

    /// True once any bound consumable has been spent.
    pub fn spent_bound(&self) -> bool {
        self.spent_bound
    }

    pub fn into_parts(self) -> (SpentList, Vec<Item>) {
        (self.spent, self.minted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{EquipSlot, ItemFlags, ItemPosition, ItemTypeId};

    struct Flagged(Vec<ItemId>);

    impl SuspicionOracle for Flagged {
        fn is_flagged(&self, item: ItemId) -> bool {
            self.0.contains(&item)
        }
    }

    const OWNER: OwnerId = OwnerId(1);
    const TARGET: ItemId = ItemId(100);

    fn state() -> ForgeState {
        let mut state = ForgeState::new(0);
        state.insert(Item::new(TARGET, OWNER, ItemTypeId(410_335), 3000));
        for id in 1..=4 {
            state.insert(Item::new(ItemId(id), OWNER, Material::DRAGON_BALL, 0));
        }
        state.insert(Item::new(ItemId(5), OWNER, Material::DRAGON_BALL_SCROLL, 0));
        state.insert(Item::new(ItemId(6), OwnerId(2), Material::DRAGON_BALL, 0));
        state.insert(
            Item::new(ItemId(7), OWNER, Material::DRAGON_BALL, 0)
                .with_position(ItemPosition::Equipped(EquipSlot::Ring)),
        );
        state.insert(Item::new(ItemId(8), OWNER, Material::DRAGON_BALL, 0).with_flags(ItemFlags::LOCKED));
        state.insert(Item::new(ItemId(9), OWNER, Material::DRAGON_BALL, 0).with_flags(ItemFlags::BOUND));
        state
    }

    fn open<'a>(state: &'a ForgeState, ids: &[u32]) -> Result<Ledger<'a>, ValidationError> {
        let ids: Vec<ItemId> = ids.iter().copied().map(ItemId).collect();
        Ledger::open(state, OWNER, TARGET, &ids, &Flagged(vec![ItemId(3)]))
    }

    #[test]
    fn rejects_every_invalid_candidate_kind() {
        let state = state();
        assert_eq!(open(&state, &[1, 1]).err(), Some(ValidationError::DuplicateConsumable(ItemId(1))));
        assert_eq!(open(&state, &[100]).err(), Some(ValidationError::ConsumableIsTarget(TARGET)));
        assert_eq!(open(&state, &[42]).err(), Some(ValidationError::ConsumableNotFound(ItemId(42))));
        assert_eq!(open(&state, &[6]).err(), Some(ValidationError::ConsumableNotOwned(ItemId(6))));
        assert_eq!(open(&state, &[7]).err(), Some(ValidationError::ConsumableNotInInventory(ItemId(7))));
        assert_eq!(open(&state, &[8]).err(), Some(ValidationError::ConsumableLocked(ItemId(8))));
        assert_eq!(open(&state, &[3]).err(), Some(ValidationError::ConsumableSuspicious(ItemId(3))));
    }

    #[test]
    fn rejects_oversized_lists() {
        let state = state();
        let ids = vec![1u32; ForgeConfig::MAX_CONSUMABLES + 1];
        assert!(matches!(
            open(&state, &ids),
            Err(ValidationError::TooManyConsumables { .. })
        ));
    }

    #[test]
    fn select_weighs_units_and_spend_is_exactly_once() {
        let state = state();
        let mut ledger = open(&state, &[1, 5, 9]).expect("valid candidates");

        let selection = ledger.select(|item| UnitFamily::DragonBall.units_of(item.item_type));
        assert_eq!(selection.total(), 12);
        assert_eq!(selection.len(), 3);

        ledger.spend(ItemId(9)).expect("first spend");
        assert!(ledger.spent_bound());
        assert_eq!(ledger.spend(ItemId(9)).err(), Some(EnhanceError::DoubleSpend(ItemId(9))));

        let rest = ledger.select(|item| UnitFamily::DragonBall.units_of(item.item_type));
        assert_eq!(rest.total(), 11);
    }
}
