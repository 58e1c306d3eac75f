//! Traits describing read-only reference data and collaborators.
//!
//! Oracles expose the item type catalog, balance configuration, the chance
//! evaluator, the anti-cheat list and the identity allocator. The [`Env`]
//! aggregate bundles them so the engine can access everything it needs without
//! hard coupling to concrete implementations.
mod chance;
mod config;
mod error;
mod ids;
mod items;
mod suspicion;

pub use chance::{ChanceOracle, PcgChance, compute_seed};
pub use config::ConfigOracle;
pub use error::OracleError;
pub use ids::IdAllocator;
pub use items::{ItemTypeDefinition, ItemTypeOracle};
pub use suspicion::SuspicionOracle;

/// Aggregates the oracles required by the enhancement engine.
///
/// Holds only shared references, so it is `Copy` for unsized oracles too.
pub struct Env<'a, I, C, R, S, A>
where
    I: ItemTypeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: ChanceOracle + ?Sized,
    S: SuspicionOracle + ?Sized,
    A: IdAllocator + ?Sized,
{
    item_types: Option<&'a I>,
    config: Option<&'a C>,
    chance: Option<&'a R>,
    suspicion: Option<&'a S>,
    ids: Option<&'a A>,
}

impl<I, C, R, S, A> Clone for Env<'_, I, C, R, S, A>
where
    I: ItemTypeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: ChanceOracle + ?Sized,
    S: SuspicionOracle + ?Sized,
    A: IdAllocator + ?Sized,
{
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, C, R, S, A> Copy for Env<'_, I, C, R, S, A>
where
    I: ItemTypeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: ChanceOracle + ?Sized,
    S: SuspicionOracle + ?Sized,
    A: IdAllocator + ?Sized,
{
}

impl<I, C, R, S, A> std::fmt::Debug for Env<'_, I, C, R, S, A>
where
    I: ItemTypeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: ChanceOracle + ?Sized,
    S: SuspicionOracle + ?Sized,
    A: IdAllocator + ?Sized,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Env")
            .field("item_types", &self.item_types.is_some())
            .field("config", &self.config.is_some())
            .field("chance", &self.chance.is_some())
            .field("suspicion", &self.suspicion.is_some())
            .field("ids", &self.ids.is_some())
            .finish()
    }
}

pub type ForgeEnv<'a> = Env<
    'a,
    dyn ItemTypeOracle + 'a,
    dyn ConfigOracle + 'a,
    dyn ChanceOracle + 'a,
    dyn SuspicionOracle + 'a,
    dyn IdAllocator + 'a,
>;

impl<'a, I, C, R, S, A> Env<'a, I, C, R, S, A>
where
    I: ItemTypeOracle + ?Sized,
    C: ConfigOracle + ?Sized,
    R: ChanceOracle + ?Sized,
    S: SuspicionOracle + ?Sized,
    A: IdAllocator + ?Sized,
{
    pub fn new(
        item_types: Option<&'a I>,
        config: Option<&'a C>,
        chance: Option<&'a R>,
        suspicion: Option<&'a S>,
        ids: Option<&'a A>,
    ) -> Self {
        Self {
            item_types,
            config,
            chance,
            suspicion,
            ids,
        }
    }

    pub fn with_all(
        item_types: &'a I,
        config: &'a C,
        chance: &'a R,
        suspicion: &'a S,
        ids: &'a A,
    ) -> Self {
        Self::new(
            Some(item_types),
            Some(config),
            Some(chance),
            Some(suspicion),
            Some(ids),
        )
    }

    pub fn empty() -> Self {
        Self {
            item_types: None,
            config: None,
            chance: None,
            suspicion: None,
            ids: None,
        }
    }

    /// Returns the ItemTypeOracle, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::ItemTypesNotAvailable` if no catalog was provided.
    pub fn item_types(&self) -> Result<&'a I, OracleError> {
        self.item_types.ok_or(OracleError::ItemTypesNotAvailable)
    }

    /// Returns the ConfigOracle, or an error if not available.
    pub fn config(&self) -> Result<&'a C, OracleError> {
        self.config.ok_or(OracleError::ConfigNotAvailable)
    }

    /// Returns the ChanceOracle, or an error if not available.
    pub fn chance(&self) -> Result<&'a R, OracleError> {
        self.chance.ok_or(OracleError::ChanceNotAvailable)
    }

    /// Returns the SuspicionOracle, or an error if not available.
    pub fn suspicion(&self) -> Result<&'a S, OracleError> {
        self.suspicion.ok_or(OracleError::SuspicionNotAvailable)
    }

    /// Returns the IdAllocator, or an error if not available.
    pub fn ids(&self) -> Result<&'a A, OracleError> {
        self.ids.ok_or(OracleError::IdsNotAvailable)
    }
}

impl<'a, I, C, R, S, A> Env<'a, I, C, R, S, A>
where
    I: ItemTypeOracle + 'a,
    C: ConfigOracle + 'a,
    R: ChanceOracle + 'a,
    S: SuspicionOracle + 'a,
    A: IdAllocator + 'a,
{
    /// Converts this environment into a trait-object based `ForgeEnv`.
    pub fn into_forge_env(self) -> ForgeEnv<'a> {
        self.as_forge_env()
    }

    /// Converts this environment into a trait-object based `ForgeEnv` (borrows self).
    pub fn as_forge_env(&self) -> ForgeEnv<'a> {
        let item_types: Option<&'a dyn ItemTypeOracle> = self.item_types.map(|o| o as _);
        let config: Option<&'a dyn ConfigOracle> = self.config.map(|o| o as _);
        let chance: Option<&'a dyn ChanceOracle> = self.chance.map(|o| o as _);
        let suspicion: Option<&'a dyn SuspicionOracle> = self.suspicion.map(|o| o as _);
        let ids: Option<&'a dyn IdAllocator> = self.ids.map(|o| o as _);
        Env::new(item_types, config, chance, suspicion, ids)
    }
}

#[cfg(test)]
mod tests {
    use crate::enhance::testing::{BLADE, Fixture};
    use crate::env::ItemTypeOracle;

    #[test]
    fn forge_env_copies_share_the_same_oracles() {
        let fx = Fixture::new();
        let env = fx.env();
        let copy = env;

        assert!(env.item_types().is_ok_and(|types| types.definition(BLADE).is_some()));
        assert!(copy.config().is_ok());
        assert!(format!("{copy:?}").contains("chance: true"));
    }

    #[test]
    fn empty_env_reports_missing_oracles() {
        let env = super::ForgeEnv::empty();
        assert!(env.ids().is_err());
        assert!(env.clone().suspicion().is_err());
    }
}
