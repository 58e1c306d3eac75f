//! Configuration oracle for exposing balance settings to the engine.
use crate::config::{ForgeConfig, Odds};

/// Provides access to tunable balance values.
pub trait ConfigOracle: Send + Sync {
    /// Odds of escaping the durability penalty after a failed upgrade.
    fn durability_escape(&self) -> Odds;

    /// Odds of the bonus roll of an under-supplied quality upgrade.
    fn quality_bonus(&self) -> Odds;

    /// Odds of converting tough drills into a star drill.
    fn drill_upgrade(&self) -> Odds;

    /// Composition tier from which the world is notified.
    fn milestone_tier(&self) -> u8;
}

impl ConfigOracle for ForgeConfig {
    fn durability_escape(&self) -> Odds {
        self.durability_escape
    }

    fn quality_bonus(&self) -> Odds {
        self.quality_bonus
    }

    fn drill_upgrade(&self) -> Odds {
        self.drill_upgrade
    }

    fn milestone_tier(&self) -> u8 {
        self.milestone_tier
    }
}
