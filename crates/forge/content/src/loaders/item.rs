//! Item type catalog loader.

use std::collections::HashSet;
use std::path::Path;

use forge_core::{ItemTypeDefinition, ItemTypeId};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item type catalog structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemTypeCatalog {
    pub items: Vec<ItemTypeDefinition>,
}

/// Loader for the item type catalog from RON files.
pub struct ItemTypeLoader;

impl ItemTypeLoader {
    /// Load the item type catalog from a RON file.
    ///
    /// Duplicate identifiers and transitions to unknown types are rejected.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemTypeDefinition>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemTypeDefinition>> {
        let catalog: ItemTypeCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Self::validate(&catalog.items)?;
        Ok(catalog.items)
    }

    fn validate(items: &[ItemTypeDefinition]) -> LoadResult<()> {
        let mut known: HashSet<ItemTypeId> = HashSet::with_capacity(items.len());
        for definition in items {
            if !known.insert(definition.id) {
                anyhow::bail!("duplicate item type {}", definition.id);
            }
        }
        for definition in items {
            for successor in [definition.level_successor, definition.quality_successor]
                .into_iter()
                .flatten()
            {
                if !known.contains(&successor) {
                    anyhow::bail!(
                        "item type {} transitions to unknown type {}",
                        definition.id,
                        successor
                    );
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transitions() {
        let content = r#"(
            items: [
                (id: (410335), name: "Blade", level: 90, durability: 3000,
                 level_successor: Some((410345))),
                (id: (410345), name: "Blade", level: 95, durability: 3200),
            ],
        )"#;
        let items = ItemTypeLoader::parse(content).expect("valid catalog");
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].level_successor, Some(ItemTypeId(410_345)));
        assert_eq!(items[1].max_tier, None);
    }

    #[test]
    fn unknown_successor_is_rejected() {
        let content = r#"(
            items: [
                (id: (410335), name: "Blade", level: 90, durability: 3000,
                 quality_successor: Some((410336))),
            ],
        )"#;
        assert!(ItemTypeLoader::parse(content).is_err());
    }
}
