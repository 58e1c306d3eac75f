use crate::state::ItemId;

/// Anti-cheat reference list of items that must never be enhanced.
///
/// Complements the persisted `SUSPICIOUS` flag: the list is maintained outside
/// the item store and may flag items that were never marked.
pub trait SuspicionOracle: Send + Sync {
    fn is_flagged(&self, item: ItemId) -> bool;
}
