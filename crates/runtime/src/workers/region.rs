//! Region worker that owns the authoritative item cache of one partition.
//!
//! Receives commands from [`RuntimeHandle`](crate::RuntimeHandle), evaluates
//! requests via [`forge_core::ForgeEngine`], persists the change set, commits
//! it to the cache, and publishes events to the EventBus.

use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use forge_core::{
    EnhanceError, EnhanceOutcome, EnhanceRequest, ForgeEngine, ForgeError, ForgeState, Item,
    ItemId, OwnerId, Requester,
};

use crate::api::{EnhanceReply, Result};
use crate::events::{Event, EventBus, OwnerEvent, WorldEvent};
use crate::oracle::OracleManager;
use crate::repository::ItemRepository;
use crate::session::SessionDirectory;

use super::announce;

/// Commands that can be sent to a region worker
pub enum Command {
    /// Evaluate, persist and commit one enhancement request.
    Enhance {
        requester: Requester,
        request: EnhanceRequest,
        reply: oneshot::Sender<Result<EnhanceReply>>,
    },
    /// Load an owner's items into the cache.
    AttachOwner {
        owner: OwnerId,
        reply: oneshot::Sender<Result<usize>>,
    },
    /// Drop an owner's items from the cache.
    DetachOwner {
        owner: OwnerId,
        reply: oneshot::Sender<usize>,
    },
    /// Query a cached item snapshot (read-only).
    QueryItem {
        item: ItemId,
        reply: oneshot::Sender<Option<Item>>,
    },
    /// Stop after the commands queued before this one.
    Shutdown,
}

/// Background task that processes the requests of one region partition.
///
/// Requests are handled strictly one at a time, so no two requests touching
/// the same item ever interleave. The cache only changes after the repository
/// accepted the change set.
pub struct RegionWorker {
    index: usize,
    state: ForgeState,
    attached: HashSet<OwnerId>,
    oracles: OracleManager,
    repository: Arc<dyn ItemRepository>,
    sessions: Arc<dyn SessionDirectory>,
    command_rx: mpsc::Receiver<Command>,
    event_bus: EventBus,
}

impl RegionWorker {
    /// Creates a new region worker.
    pub fn new(
        index: usize,
        seed: u64,
        oracles: OracleManager,
        repository: Arc<dyn ItemRepository>,
        sessions: Arc<dyn SessionDirectory>,
        command_rx: mpsc::Receiver<Command>,
        event_bus: EventBus,
    ) -> Self {
        debug!(target: "forge::worker", worker = index, "RegionWorker initialized");

        Self {
            index,
            state: ForgeState::new(seed),
            attached: HashSet::new(),
            oracles,
            repository,
            sessions,
            command_rx,
            event_bus,
        }
    }

    /// Main worker loop.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    if matches!(cmd, Command::Shutdown) {
                        break;
                    }
                    self.handle_command(cmd);
                }
                else => break,
            }
        }

        debug!(
            target: "forge::worker",
            worker = self.index,
            owners = self.attached.len(),
            items = self.state.len(),
            "RegionWorker stopped"
        );
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Enhance {
                requester,
                request,
                reply,
            } => {
                let result = self.handle_enhance(requester, &request);
                if reply.send(result).is_err() {
                    debug!(target: "forge::worker", "Enhance reply channel closed (caller dropped)");
                }
            }
            Command::AttachOwner { owner, reply } => {
                let result = self.attach(owner);
                if reply.send(result).is_err() {
                    debug!(target: "forge::worker", "AttachOwner reply channel closed (caller dropped)");
                }
            }
            Command::DetachOwner { owner, reply } => {
                let evicted = self.detach(owner);
                if reply.send(evicted).is_err() {
                    debug!(target: "forge::worker", "DetachOwner reply channel closed (caller dropped)");
                }
            }
            Command::QueryItem { item, reply } => {
                if reply.send(self.state.item(item).cloned()).is_err() {
                    debug!(target: "forge::worker", "QueryItem reply channel closed (caller dropped)");
                }
            }
            Command::Shutdown => {}
        }
    }

    /// Loads an owner once; later calls only report the cached item count.
    fn attach(&mut self, owner: OwnerId) -> Result<usize> {
        if !self.attached.contains(&owner) {
            let items = self.repository.load_owner(owner)?;
            for item in items {
                self.state.insert(item);
            }
            self.attached.insert(owner);
            debug!(target: "forge::worker", worker = self.index, %owner, "Owner attached");
        }
        Ok(self.state.items_of(owner).count())
    }

    fn detach(&mut self, owner: OwnerId) -> usize {
        self.attached.remove(&owner);
        let evicted = self.state.evict_owner(owner);
        debug!(target: "forge::worker", worker = self.index, %owner, evicted, "Owner detached");
        evicted
    }

    /// Runs one request through evaluate → persist → commit → notify.
    fn handle_enhance(
        &mut self,
        requester: Requester,
        request: &EnhanceRequest,
    ) -> Result<EnhanceReply> {
        self.attach(requester.owner)?;

        let env = self.oracles.as_forge_env();
        let outcome = match ForgeEngine::new(&self.state).execute(env, requester, request) {
            Ok(outcome) => outcome,
            Err(error) => {
                self.reject(requester, request, &error);
                return Ok(EnhanceReply::rejected(&error));
            }
        };

        if let Err(error) = self.repository.commit(&outcome.delta) {
            error!(
                target: "forge::worker",
                owner = %requester.owner,
                item = %request.target,
                kind = %request.kind,
                error = %error,
                "Failed to persist enhancement outcome; cache left untouched"
            );
            return Err(error.into());
        }

        self.state.commit(&outcome.delta);
        self.notify(requester, request, outcome)
    }

    fn reject(&self, requester: Requester, request: &EnhanceRequest, error: &EnhanceError) {
        if error.severity().is_internal() {
            error!(
                target: "forge::worker",
                owner = %requester.owner,
                item = %request.target,
                kind = %request.kind,
                code = error.error_code(),
                error = %error,
                "Enhancement aborted by an internal error"
            );
        } else {
            debug!(
                target: "forge::worker",
                owner = %requester.owner,
                item = %request.target,
                kind = %request.kind,
                code = error.error_code(),
                error = %error,
                "Enhancement rejected"
            );
        }

        self.event_bus.publish(Event::Owner(OwnerEvent::Rejected {
            owner: requester.owner,
            kind: request.kind,
            target: request.target,
            code: error.error_code().to_owned(),
            message: error.to_string(),
        }));
    }

    fn notify(
        &self,
        requester: Requester,
        request: &EnhanceRequest,
        outcome: EnhanceOutcome,
    ) -> Result<EnhanceReply> {
        let EnhanceOutcome {
            response,
            delta,
            announcements,
            rolls,
            discarded_progress,
        } = outcome;

        if discarded_progress > 0 {
            warn!(
                target: "forge::worker",
                owner = %requester.owner,
                item = %request.target,
                discarded = discarded_progress,
                "Composition progress above the tier ceiling was discarded"
            );
        }

        info!(
            target: "forge::worker",
            worker = self.index,
            owner = %requester.owner,
            item = %request.target,
            kind = %request.kind,
            result = %response.result,
            spent = delta.removed.len(),
            minted = delta.created.len(),
            rolls,
            "Enhancement committed"
        );

        for announcement in &announcements {
            let text = announce::render(
                announcement,
                requester.owner,
                self.sessions.as_ref(),
                self.oracles.item_types(),
            );
            self.event_bus
                .publish(Event::World(WorldEvent::announcement(text)));
        }

        self.event_bus.publish(Event::Owner(OwnerEvent::Enhanced {
            owner: requester.owner,
            kind: request.kind,
            response: response.clone(),
            created: delta.created,
            removed: delta.removed,
        }));

        Ok(EnhanceReply::Completed(response))
    }
}
