//! Persistent item state.
//!
//! An [`Item`] is created elsewhere (drop, purchase, reward) and removed
//! elsewhere; the forge only mutates it in place, deletes spent consumables and
//! mints rebate consumables.

use bitflags::bitflags;

use super::{ItemId, ItemTypeId, OwnerId};
use crate::config::ForgeConfig;

bitflags! {
    /// Persistent item markers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ItemFlags: u8 {
        /// Bound to the owner (monopoly): cannot be traded.
        const BOUND      = 1 << 0;
        /// Locked by the owner against accidental use.
        const LOCKED     = 1 << 1;
        /// Anti-cheat marker: every enhancement is refused.
        const SUSPICIOUS = 1 << 2;
    }
}

/// Equipment slot an item is worn in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum EquipSlot {
    Head,
    Necklace,
    Armor,
    RightHand,
    LeftHand,
    Ring,
    Boots,
    AttackTalisman,
    DefenceTalisman,
    Steed,
    Wing,
}

/// Where an item currently lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemPosition {
    #[default]
    Inventory,
    Warehouse,
    Equipped(EquipSlot),
}

impl ItemPosition {
    pub const fn is_inventory(self) -> bool {
        matches!(self, Self::Inventory)
    }
}

/// State of a single socket slot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Socket {
    /// Slot not opened yet.
    #[default]
    Absent,
    /// Slot opened and waiting for a gem.
    Empty,
    /// Slot holding the gem with the given code.
    Filled(u8),
}

impl Socket {
    pub const fn is_absent(self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Blessing (reduce-damage) tier; only 0, 1, 3, 5 and 7 exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blessing(u8);

impl Blessing {
    pub const NONE: Self = Self(0);

    pub const fn new(value: u8) -> Option<Self> {
        match value {
            0 | 1 | 3 | 5 | 7 => Some(Self(value)),
            _ => None,
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }
}

/// Mutable state of a persisted item.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    pub id: ItemId,
    pub owner: OwnerId,
    pub item_type: ItemTypeId,
    pub position: ItemPosition,
    pub durability: u16,
    pub max_durability: u16,
    /// Plus level, advanced through composition progress.
    pub tier: u8,
    /// Composition progress towards the next tier.
    pub progress: u32,
    /// Talisman charge, or the packed colour word on mounts.
    pub socket_progress: u32,
    pub sockets: [Socket; ForgeConfig::SOCKET_SLOTS],
    pub enchantment: u8,
    pub blessing: Blessing,
    pub flags: ItemFlags,
}

impl Item {
    /// Creates a plain inventory item with full durability.
    pub fn new(id: ItemId, owner: OwnerId, item_type: ItemTypeId, durability: u16) -> Self {
        Self {
            id,
            owner,
            item_type,
            position: ItemPosition::Inventory,
            durability,
            max_durability: durability,
            tier: 0,
            progress: 0,
            socket_progress: 0,
            sockets: [Socket::Absent; ForgeConfig::SOCKET_SLOTS],
            enchantment: 0,
            blessing: Blessing::NONE,
            flags: ItemFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_tier(mut self, tier: u8) -> Self {
        self.tier = tier;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: ItemPosition) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn is_bound(&self) -> bool {
        self.flags.contains(ItemFlags::BOUND)
    }

    pub fn is_locked(&self) -> bool {
        self.flags.contains(ItemFlags::LOCKED)
    }

    pub fn is_suspicious(&self) -> bool {
        self.flags.contains(ItemFlags::SUSPICIOUS)
    }

    /// Durability and maximum durability sit in the same hundred-bracket.
    pub fn is_undamaged(&self) -> bool {
        self.durability / 100 == self.max_durability / 100
    }

    /// Both sockets opened: no further socket operation is accepted.
    pub fn sockets_maxed(&self) -> bool {
        !self.sockets[1].is_absent()
    }

    /// Number of opened sockets.
    pub fn socket_count(&self) -> usize {
        self.sockets.iter().filter(|s| !s.is_absent()).count()
    }

    /// Degrades durability after a failed roll: half of maximum, never raised.
    pub fn penalize_durability(&mut self) {
        self.durability = self.durability.min(self.max_durability / 2);
    }
}
