//! Cloneable façade for issuing commands to the runtime.
//!
//! [`RuntimeHandle`] hides channel plumbing and the region partitioning, and
//! offers async helpers for submitting requests or streaming events from
//! specific topics.
//!
//! An owner's items are cached by exactly one region worker at a time. The
//! handle records that placement and detaches the owner from its previous
//! worker before a request from another region is queued, so no worker ever
//! evaluates a request against a cache another worker has moved past.
use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, broadcast, mpsc, oneshot};

use forge_core::{EnhanceRequest, Item, ItemId, OwnerId, RegionId, Requester};

use super::errors::{Result, RuntimeError};
use super::reply::EnhanceReply;
use crate::events::{Event, EventBus, Topic};
use crate::workers::Command;

/// Client-facing handle to interact with the runtime
#[derive(Clone)]
pub struct RuntimeHandle {
    workers: Arc<[mpsc::Sender<Command>]>,
    /// Worker index currently caching each owner.
    placements: Arc<Mutex<HashMap<OwnerId, usize>>>,
    event_bus: EventBus,
}

impl RuntimeHandle {
    pub(crate) fn new(workers: Arc<[mpsc::Sender<Command>]>, event_bus: EventBus) -> Self {
        Self {
            workers,
            placements: Arc::new(Mutex::new(HashMap::new())),
            event_bus,
        }
    }

    /// Number of region workers requests are partitioned across.
    pub fn worker_count(&self) -> usize {
        self.workers.len()
    }

    fn worker_index(&self, region: RegionId) -> usize {
        region.0 as usize % self.workers.len()
    }

    async fn send<T>(
        &self,
        region: RegionId,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let reply_rx = self.enqueue(self.worker_index(region), region, build).await?;
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    async fn enqueue<T>(
        &self,
        index: usize,
        region: RegionId,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<oneshot::Receiver<T>> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.workers[index]
            .send(build(reply_tx))
            .await
            .map_err(|_| RuntimeError::CommandChannelClosed { region })?;
        Ok(reply_rx)
    }

    /// Sends an owner-scoped command to the worker of `region`.
    ///
    /// When the owner is cached by another worker, that worker is told to
    /// detach first and the handle waits for it: everything queued there
    /// for the owner has been persisted before the new worker loads it. The
    /// placement lock is held until the command is queued, so commands for
    /// one owner keep their arrival order across workers.
    async fn send_placed<T>(
        &self,
        owner: OwnerId,
        region: RegionId,
        build: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T> {
        let index = self.worker_index(region);
        let reply_rx = {
            let mut placements = self.placements.lock().await;
            let previous = placements.get(&owner).copied().filter(|&p| p != index);
            if let Some(previous) = previous {
                let detached = self
                    .enqueue(previous, region, |reply| Command::DetachOwner { owner, reply })
                    .await?
                    .await
                    .map_err(RuntimeError::ReplyChannelClosed)?;
                tracing::debug!(
                    target: "forge::runtime",
                    %owner,
                    from = previous,
                    to = index,
                    detached,
                    "Owner moved between region workers"
                );
            }
            placements.insert(owner, index);
            self.enqueue(index, region, build).await?
        };

        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Stops every worker after the commands already queued.
    pub(crate) async fn shutdown_workers(&self) {
        for worker in self.workers.iter() {
            // a closed channel means the worker already stopped
            let _ = worker.send(Command::Shutdown).await;
        }
    }

    /// Submit an enhancement request on behalf of a player.
    ///
    /// Requests of one region are handled one at a time in arrival order.
    /// Returns `Err` only when the outcome could not be persisted.
    pub async fn enhance(
        &self,
        requester: Requester,
        request: EnhanceRequest,
    ) -> Result<EnhanceReply> {
        self.send_placed(requester.owner, requester.region, |reply| Command::Enhance {
            requester,
            request,
            reply,
        })
        .await?
    }

    /// Load an owner's items into the worker of a region.
    ///
    /// Returns the number of items now cached for the owner. Owners are also
    /// attached lazily on their first request, and moved automatically when
    /// they show up in a region served by another worker.
    pub async fn attach_owner(&self, owner: OwnerId, region: RegionId) -> Result<usize> {
        self.send_placed(owner, region, |reply| Command::AttachOwner { owner, reply })
            .await?
    }

    /// Drop an owner's cached items from whichever worker holds them.
    ///
    /// `region` is only used when the owner was never placed.
    pub async fn detach_owner(&self, owner: OwnerId, region: RegionId) -> Result<usize> {
        let mut placements = self.placements.lock().await;
        let index = placements
            .remove(&owner)
            .unwrap_or_else(|| self.worker_index(region));
        let reply_rx = self
            .enqueue(index, region, |reply| Command::DetachOwner { owner, reply })
            .await?;
        drop(placements);
        reply_rx.await.map_err(RuntimeError::ReplyChannelClosed)
    }

    /// Query the cached snapshot of an item (read-only).
    pub async fn query_item(&self, item: ItemId, region: RegionId) -> Result<Option<Item>> {
        self.send(region, |reply| Command::QueryItem { item, reply })
            .await
    }

    /// Subscribe to events from a specific topic
    ///
    /// # Topics
    ///
    /// - `Topic::Owner` - item snapshots and rejection notices for players
    /// - `Topic::World` - milestone announcements
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.event_bus.subscribe(topic)
    }

    /// Get a reference to the event bus for advanced usage
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }
}
