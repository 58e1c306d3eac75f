use std::sync::atomic::{AtomicU32, Ordering};

use forge_core::{IdAllocator, ItemId};

/// Process-wide item id sequence shared by every region worker.
///
/// Seeded from the highest id found in the repository so minted items never
/// collide with persisted ones.
#[derive(Debug)]
pub struct SequentialIdAllocator {
    next: AtomicU32,
}

impl SequentialIdAllocator {
    /// Allocates ids strictly above `highest`.
    pub fn starting_after(highest: Option<ItemId>) -> Self {
        let next = highest.map_or(1, |id| id.0.saturating_add(1));
        Self {
            next: AtomicU32::new(next),
        }
    }

    /// Id the next allocation will return.
    pub fn peek(&self) -> ItemId {
        ItemId(self.next.load(Ordering::Relaxed))
    }
}

impl IdAllocator for SequentialIdAllocator {
    fn allocate(&self) -> ItemId {
        ItemId(self.next.fetch_add(1, Ordering::Relaxed))
    }
}
