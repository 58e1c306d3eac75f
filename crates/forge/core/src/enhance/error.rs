//! Enhancement errors.
//!
//! Every error here is a rejection: it is raised before the change set is
//! produced, so nothing is spent and the item is untouched. A failed chance
//! roll is not an error; it is reported through [`ResultCode::Failed`].
//!
//! [`ResultCode::Failed`]: super::ResultCode::Failed

use crate::env::OracleError;
use crate::error::{ErrorContext, ErrorSeverity, ForgeError};
use crate::state::{ItemId, ItemSort};

// ============================================================================
// Validation Errors
// ============================================================================

/// Target or consumable failed the ownership and state checks.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationError {
    #[error("item {0} not found")]
    TargetNotFound(ItemId),

    #[error("item {0} does not belong to you")]
    TargetNotOwned(ItemId),

    #[error("item {0} is locked")]
    TargetLocked(ItemId),

    #[error("item {0} is flagged as suspicious")]
    TargetSuspicious(ItemId),

    #[error("item {0} must be repaired first")]
    TargetDamaged(ItemId),

    #[error("too many consumables ({count} > {max})")]
    TooManyConsumables { count: usize, max: usize },

    #[error("consumable {0} listed twice")]
    DuplicateConsumable(ItemId),

    #[error("item {0} cannot consume itself")]
    ConsumableIsTarget(ItemId),

    #[error("consumable {0} not found")]
    ConsumableNotFound(ItemId),

    #[error("consumable {0} does not belong to you")]
    ConsumableNotOwned(ItemId),

    #[error("consumable {0} is not in the inventory")]
    ConsumableNotInInventory(ItemId),

    #[error("consumable {0} is locked")]
    ConsumableLocked(ItemId),

    #[error("consumable {0} is flagged as suspicious")]
    ConsumableSuspicious(ItemId),
}

impl ValidationError {
    /// Item the rejection refers to.
    pub fn item(&self) -> Option<ItemId> {
        use ValidationError::*;
        match self {
            TargetNotFound(id)
            | TargetNotOwned(id)
            | TargetLocked(id)
            | TargetSuspicious(id)
            | TargetDamaged(id)
            | DuplicateConsumable(id)
            | ConsumableIsTarget(id)
            | ConsumableNotFound(id)
            | ConsumableNotOwned(id)
            | ConsumableNotInInventory(id)
            | ConsumableLocked(id)
            | ConsumableSuspicious(id) => Some(*id),
            TooManyConsumables { .. } => None,
        }
    }
}

impl ForgeError for ValidationError {
    fn severity(&self) -> ErrorSeverity {
        use ValidationError::*;
        match self {
            // the player can repair or unlock and retry
            TargetLocked(_) | TargetDamaged(_) | ConsumableLocked(_) => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use ValidationError::*;
        match self {
            TargetNotFound(_) => "VALIDATION_TARGET_NOT_FOUND",
            TargetNotOwned(_) => "VALIDATION_TARGET_NOT_OWNED",
            TargetLocked(_) => "VALIDATION_TARGET_LOCKED",
            TargetSuspicious(_) => "VALIDATION_TARGET_SUSPICIOUS",
            TargetDamaged(_) => "VALIDATION_TARGET_DAMAGED",
            TooManyConsumables { .. } => "VALIDATION_TOO_MANY_CONSUMABLES",
            DuplicateConsumable(_) => "VALIDATION_DUPLICATE_CONSUMABLE",
            ConsumableIsTarget(_) => "VALIDATION_CONSUMABLE_IS_TARGET",
            ConsumableNotFound(_) => "VALIDATION_CONSUMABLE_NOT_FOUND",
            ConsumableNotOwned(_) => "VALIDATION_CONSUMABLE_NOT_OWNED",
            ConsumableNotInInventory(_) => "VALIDATION_CONSUMABLE_NOT_IN_INVENTORY",
            ConsumableLocked(_) => "VALIDATION_CONSUMABLE_LOCKED",
            ConsumableSuspicious(_) => "VALIDATION_CONSUMABLE_SUSPICIOUS",
        }
    }
}

// ============================================================================
// Resource Errors
// ============================================================================

/// The supplied consumables cannot pay for the enhancement.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceError {
    /// None of the supplied consumables qualifies for this enhancement.
    #[error("no suitable materials supplied")]
    NothingQualifies,

    /// The enhancement has no partial-supply policy and the supply is short.
    #[error("not enough materials ({supplied} of {required})")]
    Insufficient { required: u32, supplied: u32 },
}

impl ForgeError for ResourceError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Recoverable
    }

    fn error_code(&self) -> &'static str {
        match self {
            ResourceError::NothingQualifies => "RESOURCE_NOTHING_QUALIFIES",
            ResourceError::Insufficient { .. } => "RESOURCE_INSUFFICIENT",
        }
    }
}

// ============================================================================
// Eligibility Errors
// ============================================================================

/// The target may not receive this enhancement in its current state.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EligibilityError {
    #[error("{0} items cannot receive this enhancement")]
    WrongClass(ItemSort),

    #[error("tier {tier} is already the maximum ({ceiling})")]
    TierCeiling { tier: u8, ceiling: u8 },

    #[error("level {level} is already the maximum ({ceiling})")]
    LevelCeiling { level: u8, ceiling: u8 },

    #[error("no further level upgrade available")]
    NoLevelSuccessor,

    #[error("quality of this item cannot be changed")]
    FixedQuality,

    #[error("no further quality upgrade available")]
    NoQualitySuccessor,

    #[error("all sockets are already open")]
    SocketsMaxed,

    #[error("no refine progress to convert")]
    NoProgress,
}

impl ForgeError for EligibilityError {
    fn severity(&self) -> ErrorSeverity {
        use EligibilityError::*;
        match self {
            // progress can be gained, then quick refine retried
            NoProgress => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        use EligibilityError::*;
        match self {
            WrongClass(_) => "ELIGIBILITY_WRONG_CLASS",
            TierCeiling { .. } => "ELIGIBILITY_TIER_CEILING",
            LevelCeiling { .. } => "ELIGIBILITY_LEVEL_CEILING",
            NoLevelSuccessor => "ELIGIBILITY_NO_LEVEL_SUCCESSOR",
            FixedQuality => "ELIGIBILITY_FIXED_QUALITY",
            NoQualitySuccessor => "ELIGIBILITY_NO_QUALITY_SUCCESSOR",
            SocketsMaxed => "ELIGIBILITY_SOCKETS_MAXED",
            NoProgress => "ELIGIBILITY_NO_PROGRESS",
        }
    }
}

// ============================================================================
// Enhancement Errors
// ============================================================================

/// Errors surfaced while executing an enhancement request.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EnhanceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Resource(#[from] ResourceError),

    #[error(transparent)]
    Eligibility(#[from] EligibilityError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    /// A consumable was spent twice within one request.
    #[error("consumable {0} spent twice")]
    DoubleSpend(ItemId),

    /// Post-condition of a protocol does not hold.
    #[cfg_attr(feature = "serde", serde(skip))]
    #[error("invariant violated: {message}")]
    Invariant {
        message: &'static str,
        context: ErrorContext,
    },
}

impl EnhanceError {
    pub fn invariant(message: &'static str, context: ErrorContext) -> Self {
        Self::Invariant { message, context }
    }
}

impl ForgeError for EnhanceError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Validation(e) => e.severity(),
            Self::Resource(e) => e.severity(),
            Self::Eligibility(e) => e.severity(),
            Self::Oracle(e) => e.severity(),
            Self::DoubleSpend(_) | Self::Invariant { .. } => ErrorSeverity::Internal,
        }
    }

    fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Invariant { context, .. } => Some(context),
            _ => None,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.error_code(),
            Self::Resource(e) => e.error_code(),
            Self::Eligibility(e) => e.error_code(),
            Self::Oracle(e) => e.error_code(),
            Self::DoubleSpend(_) => "ENHANCE_DOUBLE_SPEND",
            Self::Invariant { .. } => "ENHANCE_INVARIANT_VIOLATED",
        }
    }
}
