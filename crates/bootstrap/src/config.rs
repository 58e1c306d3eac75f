//! Server configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use directories::ProjectDirs;
use forge_runtime::RuntimeConfig;

/// Configuration required to bootstrap a forge server.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory holding `config.toml`, `items.ron` and `suspicious.ron`.
    pub data_dir: Option<PathBuf>,
    pub region_workers: usize,
    pub command_buffer: usize,
    pub event_buffer: usize,
    /// Keep items in memory only (local runs).
    pub in_memory: bool,
    pub save_dir: Option<PathBuf>,
    pub log_dir: Option<PathBuf>,
    /// Fixed world seed for reproducible rolls; random when unset.
    pub world_seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        let runtime = RuntimeConfig::default();
        Self {
            data_dir: None,
            region_workers: runtime.region_workers,
            command_buffer: runtime.command_buffer_size,
            event_buffer: runtime.event_buffer_size,
            in_memory: false,
            save_dir: None,
            log_dir: None,
            world_seed: None,
        }
    }
}

impl ServerConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `FORGE_DATA_DIR` - Content directory (default: see [`ContentOracleFactory::default_paths`])
    /// - `FORGE_REGION_WORKERS` - Number of region workers (default: 4)
    /// - `FORGE_COMMAND_BUFFER` - Command queue size per worker (default: 32)
    /// - `FORGE_EVENT_BUFFER` - Event capacity per topic (default: 100)
    /// - `FORGE_IN_MEMORY` - Skip the file repository (default: false)
    /// - `FORGE_SAVE_DIR` - Directory for owner files (default: platform-specific)
    /// - `FORGE_LOG_DIR` - Directory for log files (default: platform-specific)
    /// - `FORGE_WORLD_SEED` - Fixed world seed (default: random)
    ///
    /// [`ContentOracleFactory::default_paths`]: crate::ContentOracleFactory::default_paths
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.data_dir = env::var("FORGE_DATA_DIR").ok().map(PathBuf::from);

        if let Some(workers) = read_env::<usize>("FORGE_REGION_WORKERS") {
            config.region_workers = workers.max(1);
        }
        if let Some(capacity) = read_env::<usize>("FORGE_COMMAND_BUFFER") {
            config.command_buffer = capacity.max(1);
        }
        if let Some(capacity) = read_env::<usize>("FORGE_EVENT_BUFFER") {
            config.event_buffer = capacity.max(1);
        }

        if let Some(enable) = read_env::<bool>("FORGE_IN_MEMORY") {
            config.in_memory = enable;
        } else if env::var("FORGE_IN_MEMORY").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.in_memory = true;
        }

        config.save_dir = env::var("FORGE_SAVE_DIR").ok().map(PathBuf::from);
        config.log_dir = env::var("FORGE_LOG_DIR").ok().map(PathBuf::from);
        config.world_seed = read_env::<u64>("FORGE_WORLD_SEED");

        config
    }

    /// Runtime configuration, drawing a random world seed when none is set.
    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            region_workers: self.region_workers,
            event_buffer_size: self.event_buffer,
            command_buffer_size: self.command_buffer,
            world_seed: self.world_seed.unwrap_or_else(rand::random),
        }
    }

    /// Directory of the owner files.
    pub fn save_dir(&self) -> PathBuf {
        self.save_dir
            .clone()
            .unwrap_or_else(|| project_dir(|dirs| dirs.data_dir().join("items"), "items"))
    }

    /// Directory of the server log.
    pub fn log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| project_dir(|dirs| dirs.cache_dir().join("logs"), "logs"))
    }
}

fn project_dir(select: impl FnOnce(&ProjectDirs) -> PathBuf, fallback: &str) -> PathBuf {
    ProjectDirs::from("", "", "forge")
        .map(|dirs| select(&dirs))
        .unwrap_or_else(|| env::temp_dir().join("forge").join(fallback))
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
