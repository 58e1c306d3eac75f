//! Runtime implementations of the forge-core oracles.
//!
//! These implementations expose `forge-core` oracle traits and bundle them into
//! an [`OracleManager`] so region workers can build [`forge_core::ForgeEnv`]
//! snapshots on demand. Reference data is immutable at runtime; item state
//! lives in repositories and the workers' caches.
mod ids;
mod items;
mod suspicion;

use std::sync::Arc;

use forge_core::{Env, ForgeConfig, ForgeEnv, PcgChance};

pub use ids::SequentialIdAllocator;
pub use items::ItemTypeOracleImpl;
pub use suspicion::SuspicionOracleImpl;

/// Manages all oracle implementations and provides unified access
#[derive(Clone)]
pub struct OracleManager {
    pub(crate) item_types: Arc<ItemTypeOracleImpl>,
    pub(crate) config: Arc<ForgeConfig>,
    pub(crate) suspicion: Arc<SuspicionOracleImpl>,
    pub(crate) ids: Arc<SequentialIdAllocator>,
    pub(crate) chance: PcgChance,
}

impl OracleManager {
    /// Creates a new oracle manager
    pub fn new(
        item_types: Arc<ItemTypeOracleImpl>,
        config: Arc<ForgeConfig>,
        suspicion: Arc<SuspicionOracleImpl>,
        ids: Arc<SequentialIdAllocator>,
    ) -> Self {
        Self {
            item_types,
            config,
            suspicion,
            ids,
            chance: PcgChance, // PcgChance is stateless
        }
    }

    /// Converts oracle manager into ForgeEnv for forge-core
    pub fn as_forge_env(&self) -> ForgeEnv<'_> {
        Env::with_all(
            self.item_types.as_ref(),
            self.config.as_ref(),
            &self.chance,
            self.suspicion.as_ref(),
            self.ids.as_ref(),
        )
        .into_forge_env()
    }

    /// Item type catalog, used to resolve names for announcements.
    pub fn item_types(&self) -> &ItemTypeOracleImpl {
        &self.item_types
    }

    pub fn config(&self) -> &ForgeConfig {
        &self.config
    }

    pub fn ids(&self) -> &SequentialIdAllocator {
        &self.ids
    }
}
