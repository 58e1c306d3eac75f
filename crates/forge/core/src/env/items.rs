use crate::state::ItemTypeId;

/// Read-only access to the item type catalog and its transition table.
pub trait ItemTypeOracle: Send + Sync {
    fn definition(&self, id: ItemTypeId) -> Option<ItemTypeDefinition>;

    /// Returns every definition known to this oracle.
    fn all_definitions(&self) -> Vec<ItemTypeDefinition>;
}

/// Static description of one item type.
///
/// # Transitions
///
/// - `level_successor`: type reached by a level upgrade (same quality, next level)
/// - `quality_successor`: type reached by a quality upgrade (same level, next quality)
///
/// `None` means the type sits at that ceiling: the upgrade is reported as
/// "no further upgrade" and nothing is mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemTypeDefinition {
    pub id: ItemTypeId,
    pub name: String,
    /// Level required to wear the item.
    pub level: u8,
    /// Base (maximum) durability of a freshly created item.
    pub durability: u16,
    #[cfg_attr(feature = "serde", serde(default))]
    pub level_successor: Option<ItemTypeId>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub quality_successor: Option<ItemTypeId>,
    /// Type-specific tier cap below the class ceiling.
    #[cfg_attr(feature = "serde", serde(default))]
    pub max_tier: Option<u8>,
}

impl ItemTypeDefinition {
    pub fn new(id: ItemTypeId, name: impl Into<String>, level: u8, durability: u16) -> Self {
        Self {
            id,
            name: name.into(),
            level,
            durability,
            level_successor: None,
            quality_successor: None,
            max_tier: None,
        }
    }

    #[must_use]
    pub fn with_level_successor(mut self, successor: ItemTypeId) -> Self {
        self.level_successor = Some(successor);
        self
    }

    #[must_use]
    pub fn with_quality_successor(mut self, successor: ItemTypeId) -> Self {
        self.quality_successor = Some(successor);
        self
    }

    #[must_use]
    pub fn with_max_tier(mut self, max_tier: u8) -> Self {
        self.max_tier = Some(max_tier);
        self
    }
}
