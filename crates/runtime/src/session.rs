//! Session lookup used to render world announcements.
//!
//! The forge never touches player sessions directly; it only needs a display
//! name for the owner of a milestone item.
use std::collections::HashMap;
use std::sync::RwLock;

use forge_core::OwnerId;

/// Resolves online players by owner id.
pub trait SessionDirectory: Send + Sync {
    /// Display name of an online owner, `None` when offline or unknown.
    fn name_of(&self, owner: OwnerId) -> Option<String>;
}

/// Session directory kept in memory, fed by the host's login flow.
#[derive(Debug, Default)]
pub struct InMemorySessionDirectory {
    names: RwLock<HashMap<OwnerId, String>>,
}

impl InMemorySessionDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an online owner, replacing a previous name.
    pub fn register(&self, owner: OwnerId, name: impl Into<String>) {
        if let Ok(mut names) = self.names.write() {
            names.insert(owner, name.into());
        }
    }

    pub fn unregister(&self, owner: OwnerId) {
        if let Ok(mut names) = self.names.write() {
            names.remove(&owner);
        }
    }
}

impl SessionDirectory for InMemorySessionDirectory {
    fn name_of(&self, owner: OwnerId) -> Option<String> {
        self.names.read().ok()?.get(&owner).cloned()
    }
}
