use arrayvec::ArrayVec;

use super::{EnhanceFlags, EnhanceKind};
use crate::config::ForgeConfig;
use crate::state::{Item, ItemId, ItemTypeId, OwnerId, RegionId};

/// Decoded enhancement request.
///
/// `consumables` is untrusted input: its order matters (composition and
/// talisman charge consume in request order) and every entry is re-validated
/// before anything is spent.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnhanceRequest {
    pub target: ItemId,
    pub kind: EnhanceKind,
    pub consumables: Vec<ItemId>,
    pub flags: EnhanceFlags,
}

impl EnhanceRequest {
    pub fn new(target: ItemId, kind: EnhanceKind) -> Self {
        Self {
            target,
            kind,
            consumables: Vec::new(),
            flags: EnhanceFlags::empty(),
        }
    }

    #[must_use]
    pub fn with_consumables(mut self, consumables: impl IntoIterator<Item = ItemId>) -> Self {
        self.consumables = consumables.into_iter().collect();
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: EnhanceFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// Identity of the player issuing a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Requester {
    pub owner: OwnerId,
    /// Region the player stands in; selects the scheduling partition.
    pub region: RegionId,
}

impl Requester {
    pub fn new(owner: OwnerId, region: RegionId) -> Self {
        Self { owner, region }
    }
}

/// Outcome code reported to the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum ResultCode {
    /// Roll failed, or progress stored without a visible change.
    Failed = 0,
    Success = 1,
}

impl ResultCode {
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    pub const fn from_bool(success: bool) -> Self {
        if success { Self::Success } else { Self::Failed }
    }
}

/// Response sent back to the requesting player.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnhanceResponse {
    pub target: ItemId,
    pub result: ResultCode,
    /// Target snapshot after the request.
    pub item: Item,
}

/// World-visible milestone reached by a request.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Announcement {
    /// Composition brought the item to a milestone tier.
    TierReached {
        item: ItemId,
        item_type: ItemTypeId,
        tier: u8,
    },
    /// Quality upgrade reached super quality.
    SuperQuality { item: ItemId, item_type: ItemTypeId },
    /// Tough drills were converted into a star drill.
    StarDrill { drill: ItemId },
}

/// Spent consumables of one request, in the order they were spent.
pub type SpentList = ArrayVec<ItemId, { ForgeConfig::MAX_CONSUMABLES }>;
