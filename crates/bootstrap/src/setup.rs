//! Runtime wiring from a [`ServerConfig`].
use std::sync::Arc;

use anyhow::{Context, Result};
use forge_runtime::{
    FileItemRepository, InMemoryItemRepository, ItemRepository, Runtime, SessionDirectory,
};

use crate::config::ServerConfig;
use crate::oracles::{ContentOracleFactory, OracleFactory};

/// Assembles repository, oracles and runtime for a server process.
pub struct ServerSetup {
    config: ServerConfig,
    sessions: Option<Arc<dyn SessionDirectory>>,
}

impl ServerSetup {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config,
            sessions: None,
        }
    }

    /// Session directory fed by the host's login flow (optional).
    pub fn sessions(mut self, sessions: Arc<dyn SessionDirectory>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    fn repository(&self) -> Result<Arc<dyn ItemRepository>> {
        if self.config.in_memory {
            return Ok(Arc::new(InMemoryItemRepository::new()));
        }

        let save_dir = self.config.save_dir();
        let repository = FileItemRepository::new(&save_dir).with_context(|| {
            format!("Failed to open item repository at {}", save_dir.display())
        })?;
        tracing::info!(target: "forge::bootstrap", save_dir = %save_dir.display(), "Using file repository");
        Ok(Arc::new(repository))
    }

    /// Build the runtime and spawn its workers.
    pub async fn build(self) -> Result<Runtime> {
        let repository = self.repository()?;

        let factory = match &self.config.data_dir {
            Some(dir) => ContentOracleFactory::new(dir),
            None => ContentOracleFactory::default_paths(),
        };
        let oracles = factory.build(repository.as_ref())?;

        let mut builder = Runtime::builder()
            .config(self.config.runtime_config())
            .oracles(oracles)
            .repository(repository);
        if let Some(sessions) = self.sessions {
            builder = builder.sessions(sessions);
        }

        Ok(builder.build().await?)
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    #[tokio::test]
    async fn builds_an_in_memory_runtime() {
        let config = ServerConfig {
            data_dir: Some(Path::new(env!("CARGO_MANIFEST_DIR")).join("../forge/content/data")),
            region_workers: 2,
            in_memory: true,
            world_seed: Some(1),
            ..ServerConfig::default()
        };

        let runtime = ServerSetup::new(config).build().await.expect("runtime");
        assert_eq!(runtime.handle().worker_count(), 2);
        runtime.shutdown().await.expect("shutdown");
    }
}
