use super::{Item, ItemId, OwnerId};

/// Change set produced by one enhancement request.
///
/// The engine never mutates [`ForgeState`](super::ForgeState) directly: it
/// returns a delta that the caller persists first and applies second, so a
/// failed write leaves the in-memory view untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemDelta {
    /// Owner whose items are touched; a delta never spans two owners.
    pub owner: OwnerId,

    /// Items mutated in place (always includes the target).
    pub updated: Vec<Item>,

    /// Rebate and conversion items minted by the request.
    pub created: Vec<Item>,

    /// Consumables spent by the request.
    pub removed: Vec<ItemId>,
}

impl ItemDelta {
    pub fn new(owner: OwnerId) -> Self {
        Self {
            owner,
            ..Self::default()
        }
    }

    /// Returns true if the request touched nothing.
    pub fn is_empty(&self) -> bool {
        self.updated.is_empty() && self.created.is_empty() && self.removed.is_empty()
    }

    /// Number of item records written by this delta.
    pub fn len(&self) -> usize {
        self.updated.len() + self.created.len() + self.removed.len()
    }
}
