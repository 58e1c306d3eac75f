use std::collections::HashSet;

use forge_core::{ItemId, SuspicionOracle};

/// Anti-cheat list loaded once at startup.
#[derive(Debug, Default)]
pub struct SuspicionOracleImpl {
    flagged: HashSet<ItemId>,
}

impl SuspicionOracleImpl {
    pub fn new(flagged: impl IntoIterator<Item = ItemId>) -> Self {
        Self {
            flagged: flagged.into_iter().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.flagged.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flagged.is_empty()
    }
}

impl SuspicionOracle for SuspicionOracleImpl {
    fn is_flagged(&self, item: ItemId) -> bool {
        self.flagged.contains(&item)
    }
}
