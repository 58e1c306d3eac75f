//! Content loaders for reading forge data from files.

pub mod config;
pub mod factory;
pub mod item;
pub mod suspicious;

pub use config::ConfigLoader;
pub use factory::ContentFactory;
pub use item::{ItemTypeCatalog, ItemTypeLoader};
pub use suspicious::{SuspiciousList, SuspiciousLoader};

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
