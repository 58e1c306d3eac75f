//! Reply returned to the caller of an enhancement request.
use serde::{Deserialize, Serialize};

use forge_core::{EnhanceError, EnhanceResponse, ErrorSeverity, ForgeError};

/// Outcome of one enhancement request as seen by the requesting player.
///
/// A failed roll is a [`EnhanceReply::Completed`] reply with result code 0;
/// only refused requests are [`EnhanceReply::Rejected`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnhanceReply {
    Completed(EnhanceResponse),

    /// Nothing was spent and nothing changed.
    Rejected {
        /// Stable rejection code (`VALIDATION_TARGET_LOCKED`, ...).
        code: String,
        message: String,
        severity: ErrorSeverity,
    },
}

impl EnhanceReply {
    pub(crate) fn rejected(error: &EnhanceError) -> Self {
        Self::Rejected {
            code: error.error_code().to_owned(),
            message: error.to_string(),
            severity: error.severity(),
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed(_))
    }

    /// Returns the response of a completed request.
    pub fn response(&self) -> Option<&EnhanceResponse> {
        match self {
            Self::Completed(response) => Some(response),
            Self::Rejected { .. } => None,
        }
    }

    /// Returns the rejection code of a refused request.
    pub fn rejection_code(&self) -> Option<&str> {
        match self {
            Self::Completed(_) => None,
            Self::Rejected { code, .. } => Some(code),
        }
    }
}
