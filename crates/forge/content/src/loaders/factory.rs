//! Content factory for building reference data from data files.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use forge_core::{ForgeConfig, ItemId, ItemTypeDefinition};

use crate::loaders::{ConfigLoader, ItemTypeLoader, LoadResult, SuspiciousLoader};

/// Content factory that loads all forge content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── suspicious.ron   (optional)
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Load balance configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<ForgeConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load the item type catalog from `items.ron`.
    pub fn load_item_types(&self) -> LoadResult<Vec<ItemTypeDefinition>> {
        ItemTypeLoader::load(&self.data_dir.join("items.ron"))
    }

    /// Load flagged items from `suspicious.ron`.
    pub fn load_suspicious(&self) -> LoadResult<HashSet<ItemId>> {
        SuspiciousLoader::load(&self.data_dir.join("suspicious.ron"))
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}
