use arrayvec::ArrayVec;

use crate::config::ForgeConfig;
use crate::state::ItemId;

/// A qualifying consumable and the units it contributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: ItemId,
    pub units: u32,
    pub bound: bool,
}

/// Qualifying candidates in request order plus their weighted total.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    entries: ArrayVec<Candidate, { ForgeConfig::MAX_CONSUMABLES }>,
    total: u32,
}

/// Consumption policy chosen by comparing the total to the requirement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpendPlan {
    /// Total covers the requirement: spend `walk`, rebate `excess` singles.
    Sufficient { walk: Selection, excess: u32 },
    /// Total falls short: every candidate is spent for a proportional roll.
    Insufficient { total: u32 },
}

impl Selection {
    pub(crate) fn push(&mut self, candidate: Candidate) {
        // the ledger never holds more candidates than the selection can store
        if self.entries.try_push(candidate).is_ok() {
            self.total = self.total.saturating_add(candidate.units);
        }
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn first(&self) -> Option<&Candidate> {
        self.entries.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
        self.entries.iter()
    }

    /// Keeps the first `count` candidates.
    #[must_use]
    pub fn take(&self, count: usize) -> Selection {
        let mut taken = Selection::default();
        for candidate in self.entries.iter().take(count) {
            taken.push(*candidate);
        }
        taken
    }

    pub fn any_bound(&self) -> bool {
        self.entries.iter().any(|c| c.bound)
    }

    /// Chooses the consumption policy; `total >= required` is sufficient.
    ///
    /// The sufficient walk visits candidates highest unit value first, ties in
    /// request order, and stops as soon as the requirement is met.
    pub fn plan(&self, required: u32) -> SpendPlan {
        if self.total < required {
            return SpendPlan::Insufficient { total: self.total };
        }

        let mut order: ArrayVec<&Candidate, { ForgeConfig::MAX_CONSUMABLES }> =
            self.entries.iter().collect();
        order.sort_by(|a, b| b.units.cmp(&a.units));

        let mut walk = Selection::default();
        for candidate in order {
            if walk.total >= required {
                break;
            }
            walk.push(*candidate);
        }
        let excess = walk.total - required;
        SpendPlan::Sufficient { walk, excess }
    }
}

impl FromIterator<Candidate> for Selection {
    fn from_iter<T: IntoIterator<Item = Candidate>>(iter: T) -> Self {
        let mut selection = Selection::default();
        for candidate in iter {
            selection.push(candidate);
        }
        selection
    }
}
