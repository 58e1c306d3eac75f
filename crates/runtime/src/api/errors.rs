//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from worker coordination and repositories so clients can
//! bubble them up with consistent context. Enhancement rejections are not
//! errors at this level: they travel as [`EnhanceReply::Rejected`].
//!
//! [`EnhanceReply::Rejected`]: super::EnhanceReply::Rejected
use thiserror::Error;
use tokio::sync::oneshot;

use forge_core::RegionId;

pub use crate::repository::RepositoryError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("region worker command channel closed ({region})")]
    CommandChannelClosed { region: RegionId },

    #[error("region worker reply channel closed")]
    ReplyChannelClosed(#[source] oneshot::error::RecvError),

    #[error("region worker join failed")]
    WorkerJoin(#[source] tokio::task::JoinError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("runtime requires oracles to be configured before building")]
    MissingOracles,

    #[error("runtime requires a repository to be configured before building")]
    MissingRepository,

    #[error("runtime requires at least one region worker")]
    NoWorkers,
}
