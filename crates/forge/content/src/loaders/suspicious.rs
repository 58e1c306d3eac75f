//! Anti-cheat list loader.

use std::collections::HashSet;
use std::path::Path;

use forge_core::ItemId;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Suspicious item list structure for RON files.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SuspiciousList {
    #[serde(default)]
    pub items: Vec<ItemId>,
}

/// Loader for the suspicious item list.
pub struct SuspiciousLoader;

impl SuspiciousLoader {
    /// Load flagged item ids; a missing file means nothing is flagged.
    pub fn load(path: &Path) -> LoadResult<HashSet<ItemId>> {
        if !path.exists() {
            return Ok(HashSet::new());
        }
        let content = read_file(path)?;
        let list: SuspiciousList = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse suspicious list RON: {}", e))?;
        Ok(list.items.into_iter().collect())
    }
}
