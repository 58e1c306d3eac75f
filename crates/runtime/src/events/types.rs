//! Event types for different topics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forge_core::{EnhanceKind, EnhanceResponse, Item, ItemId, OwnerId};

/// Notifications addressed to a single owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OwnerEvent {
    /// A request was committed: the target snapshot plus every item the
    /// request minted or destroyed.
    Enhanced {
        owner: OwnerId,
        kind: EnhanceKind,
        response: EnhanceResponse,
        created: Vec<Item>,
        removed: Vec<ItemId>,
    },

    /// A request was refused; shown to the player as a chat notice.
    Rejected {
        owner: OwnerId,
        kind: EnhanceKind,
        target: ItemId,
        code: String,
        message: String,
    },
}

impl OwnerEvent {
    pub fn owner(&self) -> OwnerId {
        match self {
            Self::Enhanced { owner, .. } | Self::Rejected { owner, .. } => *owner,
        }
    }
}

/// Broadcasts visible to every player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WorldEvent {
    Announcement { text: String, at: DateTime<Utc> },
}

impl WorldEvent {
    /// Announcement stamped with the current time.
    pub fn announcement(text: impl Into<String>) -> Self {
        Self::Announcement {
            text: text.into(),
            at: Utc::now(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Announcement { text, .. } => text,
        }
    }
}
