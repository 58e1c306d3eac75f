//! Error types raised by repository implementations.

use thiserror::Error;

use forge_core::{ItemId, OwnerId};

/// Errors surfaced by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("item repository lock was poisoned")]
    LockPoisoned,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("corrupted data: {0}")]
    CorruptedData(String),

    #[error("{item} belongs to {actual}, not {expected}")]
    OwnerMismatch {
        item: ItemId,
        expected: OwnerId,
        actual: OwnerId,
    },

    #[error("{0} is not stored")]
    MissingItem(ItemId),

    #[error("{0} is already stored")]
    DuplicateItem(ItemId),

    #[error("write rejected: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, RepositoryError>;
