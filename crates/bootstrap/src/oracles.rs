//! Helpers for constructing oracle managers consumed by the runtime.
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use forge_content::ContentFactory;
use forge_runtime::{
    ItemRepository, ItemTypeOracleImpl, OracleManager, SequentialIdAllocator, SuspicionOracleImpl,
};

pub trait OracleFactory: Send + Sync {
    /// Builds the oracles; the repository seeds the item id sequence.
    fn build(&self, repository: &dyn ItemRepository) -> Result<OracleManager>;
}

/// Oracle factory that loads forge content from data files.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── items.ron
/// └── suspicious.ron   (optional)
/// ```
#[derive(Clone, Debug)]
pub struct ContentOracleFactory {
    data_dir: PathBuf,
}

impl ContentOracleFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Create with default paths.
    ///
    /// This tries to find the data directory in the following order:
    /// 1. Relative to current executable (../../crates/forge/content/data)
    /// 2. Relative to current directory (crates/forge/content/data)
    pub fn default_paths() -> Self {
        const RELATIVE: &str = "crates/forge/content/data";

        let from_exe = std::env::current_exe().ok().and_then(|exe| {
            let root = exe.parent()?.parent()?.parent()?;
            Some(root.join(RELATIVE)).filter(|dir| dir.exists())
        });
        let data_dir = from_exe.unwrap_or_else(|| {
            std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join(RELATIVE)
        });

        Self::new(data_dir)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

impl OracleFactory for ContentOracleFactory {
    fn build(&self, repository: &dyn ItemRepository) -> Result<OracleManager> {
        if !self.data_dir.exists() {
            anyhow::bail!(
                "Content data directory not found: {} (set FORGE_DATA_DIR to override)",
                self.data_dir.display()
            );
        }

        let factory = ContentFactory::new(&self.data_dir);
        let config = factory.load_config()?;
        let item_types = factory.load_item_types()?;
        let flagged = factory.load_suspicious()?;
        let highest = repository
            .max_item_id()
            .context("Failed to scan the repository for the highest item id")?;

        tracing::info!(
            target: "forge::bootstrap",
            data_dir = %self.data_dir.display(),
            item_types = item_types.len(),
            flagged = flagged.len(),
            "Loaded forge content"
        );

        Ok(OracleManager::new(
            Arc::new(ItemTypeOracleImpl::from_definitions(item_types)),
            Arc::new(config),
            Arc::new(SuspicionOracleImpl::new(flagged)),
            Arc::new(SequentialIdAllocator::starting_after(highest)),
        ))
    }
}

#[cfg(test)]
mod tests {
    use forge_core::{Item, ItemId, ItemTypeId, OwnerId};
    use forge_runtime::InMemoryItemRepository;

    use super::*;

    fn shipped() -> ContentOracleFactory {
        let root = Path::new(env!("CARGO_MANIFEST_DIR"));
        ContentOracleFactory::new(root.join("../forge/content/data"))
    }

    #[test]
    fn builds_from_shipped_content() {
        let repository = InMemoryItemRepository::with_items([Item::new(
            ItemId(500),
            OwnerId(1),
            ItemTypeId(410_335),
            3000,
        )]);

        let oracles = shipped().build(&repository).expect("oracles");
        assert!(!oracles.item_types().is_empty());
        assert_eq!(oracles.ids().peek(), ItemId(501));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let factory = ContentOracleFactory::new("/nonexistent/forge/data");
        assert!(factory.build(&InMemoryItemRepository::new()).is_err());
    }
}
