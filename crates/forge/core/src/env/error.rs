//! Oracle access errors.

use crate::error::{ErrorSeverity, ForgeError};
use crate::state::ItemTypeId;

/// Errors that occur when accessing oracle data.
///
/// A missing oracle is fatal: the engine cannot evaluate a request without its
/// reference data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    #[error("ItemTypeOracle not available")]
    ItemTypesNotAvailable,

    #[error("ConfigOracle not available")]
    ConfigNotAvailable,

    #[error("ChanceOracle not available")]
    ChanceNotAvailable,

    #[error("SuspicionOracle not available")]
    SuspicionNotAvailable,

    #[error("IdAllocator not available")]
    IdsNotAvailable,

    /// Item type is not part of the catalog.
    #[error("item type {0} not found")]
    ItemTypeNotFound(ItemTypeId),
}

impl ForgeError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        use OracleError::*;
        match self {
            ItemTypesNotAvailable | ConfigNotAvailable | ChanceNotAvailable
            | SuspicionNotAvailable | IdsNotAvailable => ErrorSeverity::Fatal,
            ItemTypeNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use OracleError::*;
        match self {
            ItemTypesNotAvailable => "ORACLE_ITEM_TYPES_NOT_AVAILABLE",
            ConfigNotAvailable => "ORACLE_CONFIG_NOT_AVAILABLE",
            ChanceNotAvailable => "ORACLE_CHANCE_NOT_AVAILABLE",
            SuspicionNotAvailable => "ORACLE_SUSPICION_NOT_AVAILABLE",
            IdsNotAvailable => "ORACLE_IDS_NOT_AVAILABLE",
            ItemTypeNotFound(_) => "ORACLE_ITEM_TYPE_NOT_FOUND",
        }
    }
}
