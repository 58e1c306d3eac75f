use crate::state::ItemId;

/// Source of fresh item identities for minted rebate and conversion items.
///
/// Implementations must never return an identity already in use.
pub trait IdAllocator: Send + Sync {
    fn allocate(&self) -> ItemId;
}
