//! [`forge_core::ItemTypeOracle`] backed by an in-memory map.
use std::collections::HashMap;

use forge_core::{ItemTypeDefinition, ItemTypeId, ItemTypeOracle};

/// ItemTypeOracle implementation with static item type definitions
pub struct ItemTypeOracleImpl {
    definitions: HashMap<ItemTypeId, ItemTypeDefinition>,
}

impl ItemTypeOracleImpl {
    pub fn new() -> Self {
        Self {
            definitions: HashMap::new(),
        }
    }

    /// Builds the oracle from a loaded catalog.
    pub fn from_definitions(definitions: impl IntoIterator<Item = ItemTypeDefinition>) -> Self {
        Self {
            definitions: definitions.into_iter().map(|def| (def.id, def)).collect(),
        }
    }

    /// Add an item type definition
    pub fn add_definition(&mut self, def: ItemTypeDefinition) {
        self.definitions.insert(def.id, def);
    }

    /// Display name of a type, falling back to its numeric identifier.
    pub fn name_of(&self, id: ItemTypeId) -> String {
        self.definitions
            .get(&id)
            .map_or_else(|| id.to_string(), |def| def.name.clone())
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for ItemTypeOracleImpl {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemTypeOracle for ItemTypeOracleImpl {
    fn definition(&self, id: ItemTypeId) -> Option<ItemTypeDefinition> {
        self.definitions.get(&id).cloned()
    }

    fn all_definitions(&self) -> Vec<ItemTypeDefinition> {
        self.definitions.values().cloned().collect()
    }
}
