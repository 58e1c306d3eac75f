//! Enhancement protocols.
//!
//! Each enhancement kind is a short saga sharing one envelope:
//!
//! ```text
//! validate target -> gate (check) -> ledger + chance (apply) -> post_validate
//! ```
//!
//! The envelope lives in [`crate::engine`]; this module defines the
//! [`EnhanceProtocol`] strategy interface, its per-kind implementations under
//! [`kinds`], and the request/response shapes.
mod context;
mod error;
mod kind;
pub mod kinds;
mod request;
pub mod tables;

#[cfg(test)]
pub(crate) mod testing;

pub use context::{EnhanceContext, Payment};
pub use error::{EligibilityError, EnhanceError, ResourceError, ValidationError};
pub use kind::{EnhanceFlags, EnhanceKind};
pub use request::{
    Announcement, EnhanceRequest, EnhanceResponse, Requester, ResultCode, SpentList,
};

use crate::env::ItemTypeDefinition;
use crate::state::Item;

/// Strategy interface implemented once per [`EnhanceKind`].
pub trait EnhanceProtocol: Send + Sync {
    fn kind(&self) -> EnhanceKind;

    /// Eligibility of the target; runs before any consumable is looked at.
    fn check(&self, target: &Item, definition: &ItemTypeDefinition)
    -> Result<(), EligibilityError>;

    /// Spends consumables, rolls and mutates the working target.
    ///
    /// Rejections must be raised before the first roll; after that point the
    /// outcome is reported through [`EnhanceContext::result`].
    fn apply(&self, ctx: &mut EnhanceContext<'_>) -> Result<(), EnhanceError>;

    /// Post-conditions over the target before and after `apply`.
    fn post_validate(&self, before: &Item, ctx: &EnhanceContext<'_>) -> Result<(), EnhanceError> {
        let _ = (before, ctx);
        Ok(())
    }
}

impl EnhanceKind {
    /// Protocol implementing this kind.
    pub fn protocol(self) -> &'static dyn EnhanceProtocol {
        kinds::protocol(self)
    }
}
