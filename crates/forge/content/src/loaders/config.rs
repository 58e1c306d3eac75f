//! Balance configuration loader.

use std::path::Path;

use forge_core::ForgeConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for balance configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys fall back to the built-in defaults.
    pub fn load(path: &Path) -> LoadResult<ForgeConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ForgeConfig> {
        let config: ForgeConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;

        for (name, odds) in [
            ("durability_escape", config.durability_escape),
            ("quality_bonus", config.quality_bonus),
            ("drill_upgrade", config.drill_upgrade),
        ] {
            if odds.denominator == 0 {
                anyhow::bail!("{name}: denominator must be positive");
            }
        }
        Ok(config)
    }
}
