//! Error classification shared by every stage of an enhancement.
//!
//! A request can be refused at four points: target validation, the
//! eligibility gate, the resource ledger and the oracles. Each stage owns its
//! own error enum (see [`crate::enhance`] and [`crate::env`]); this module
//! only holds what they have in common. All of them are raised before a
//! change set exists, so a refused request never touches an item.
//!
//! The runtime relies on two things from every error: a stable
//! [`error_code`](ForgeError::error_code) that is sent to the player, and a
//! [`severity`](ForgeError::severity) that picks the log level.

use crate::state::{ItemId, OwnerId};

/// Who is at fault for a refused request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum ErrorSeverity {
    /// The item or the supplied materials do not meet the requirement yet:
    /// a maxed socket, a level ceiling, no dragon ball in the list.
    Recoverable,

    /// The request itself is malformed or hostile: a foreign or locked
    /// consumable, a duplicated id, a flagged target.
    Validation,

    /// The engine broke one of its own rules while building the change set.
    Internal,

    /// A collaborator the engine needs was never wired in.
    Fatal,
}

impl ErrorSeverity {
    /// Faults of the server rather than of the player.
    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal | Self::Fatal)
    }
}

/// Identities attached to internal errors for the logs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ErrorContext {
    pub owner: Option<OwnerId>,
    /// Target or consumable involved.
    pub item: Option<ItemId>,
}

impl ErrorContext {
    #[must_use]
    pub const fn with_owner(mut self, owner: OwnerId) -> Self {
        self.owner = Some(owner);
        self
    }

    #[must_use]
    pub const fn with_item(mut self, item: ItemId) -> Self {
        self.item = Some(item);
        self
    }
}

/// Implemented by every error a request can be refused with.
pub trait ForgeError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Owner and item involved, when the error carries them.
    fn context(&self) -> Option<&ErrorContext> {
        None
    }

    /// Rejection code sent to the client. Must stay stable across releases.
    fn error_code(&self) -> &'static str;
}
