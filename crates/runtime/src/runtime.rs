//! High-level runtime orchestrator.
//!
//! The runtime owns the region workers, wires up command/event channels, and
//! exposes a builder-based API for hosts to submit enhancement requests.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use forge_core::compute_seed;

use crate::api::{Result, RuntimeError, RuntimeHandle};
use crate::events::EventBus;
use crate::oracle::OracleManager;
use crate::repository::ItemRepository;
use crate::session::{InMemorySessionDirectory, SessionDirectory};
use crate::workers::{Command, RegionWorker};

/// Runtime configuration shared across the orchestrator and workers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of region workers; a region is served by `region % workers`.
    pub region_workers: usize,
    pub event_buffer_size: usize,
    pub command_buffer_size: usize,
    /// Seed mixed into every chance roll of the world.
    pub world_seed: u64,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            region_workers: 4,
            event_buffer_size: 100,
            command_buffer_size: 32,
            world_seed: 0,
        }
    }
}

/// Main runtime that orchestrates the region workers
///
/// Design: Runtime owns workers and coordinates shutdown.
/// [`RuntimeHandle`] provides a cloneable façade for clients.
pub struct Runtime {
    handle: RuntimeHandle,
    worker_handles: Vec<JoinHandle<()>>,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    /// Get a cloneable handle to this runtime
    ///
    /// The handle can be shared across clients and async tasks.
    pub fn handle(&self) -> RuntimeHandle {
        self.handle.clone()
    }

    /// Shutdown the runtime gracefully
    ///
    /// Workers drain the commands already queued and then stop, even while
    /// handle clones are still alive; later requests on those clones fail
    /// with [`RuntimeError::CommandChannelClosed`].
    pub async fn shutdown(self) -> Result<()> {
        self.handle.shutdown_workers().await;
        drop(self.handle);

        for worker in self.worker_handles {
            worker.await.map_err(RuntimeError::WorkerJoin)?;
        }

        Ok(())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    oracles: Option<OracleManager>,
    repository: Option<Arc<dyn ItemRepository>>,
    sessions: Option<Arc<dyn SessionDirectory>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            oracles: None,
            repository: None,
            sessions: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Set required oracle manager
    pub fn oracles(mut self, oracles: OracleManager) -> Self {
        self.oracles = Some(oracles);
        self
    }

    /// Set required item repository
    pub fn repository(mut self, repository: Arc<dyn ItemRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Set the session directory used for announcements (optional)
    ///
    /// Defaults to an empty in-memory directory: owners are shown by id.
    pub fn sessions(mut self, sessions: Arc<dyn SessionDirectory>) -> Self {
        self.sessions = Some(sessions);
        self
    }

    /// Build the runtime and spawn its region workers
    pub async fn build(self) -> Result<Runtime> {
        let oracles = self.oracles.ok_or(RuntimeError::MissingOracles)?;
        let repository = self.repository.ok_or(RuntimeError::MissingRepository)?;
        let sessions = self.sessions.unwrap_or_else(|| {
            Arc::new(InMemorySessionDirectory::new()) as Arc<dyn SessionDirectory>
        });

        if self.config.region_workers == 0 {
            return Err(RuntimeError::NoWorkers);
        }

        let event_bus = EventBus::with_capacity(self.config.event_buffer_size);
        let mut senders = Vec::with_capacity(self.config.region_workers);
        let mut worker_handles = Vec::with_capacity(self.config.region_workers);

        for index in 0..self.config.region_workers {
            let (command_tx, command_rx) =
                mpsc::channel::<Command>(self.config.command_buffer_size);
            let seed = compute_seed(self.config.world_seed, 0, index as u32, 0);

            let worker = RegionWorker::new(
                index,
                seed,
                oracles.clone(),
                Arc::clone(&repository),
                Arc::clone(&sessions),
                command_rx,
                event_bus.clone(),
            );

            senders.push(command_tx);
            worker_handles.push(tokio::spawn(async move {
                worker.run().await;
            }));
        }

        tracing::info!(
            target: "forge::runtime",
            workers = self.config.region_workers,
            next_item_id = oracles.ids().peek().0,
            "Runtime started"
        );

        Ok(Runtime {
            handle: RuntimeHandle::new(senders.into(), event_bus),
            worker_handles,
        })
    }
}
