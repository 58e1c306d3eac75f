//! Deterministic item enhancement core.
//!
//! `forge-core` evaluates enhancement requests (tier refine, level and quality
//! upgrades, enchanting, talisman charging, socketing) against an in-memory
//! view of a region's items and returns a change set. It performs no I/O;
//! reference data and the chance evaluator are injected through [`env`].
//!
//! # Modules
//!
//! - [`state`]: items, identifiers and the change set
//! - [`env`]: oracle traits (catalog, config, chance, anti-cheat, ids)
//! - [`gate`]: eligibility checks and ceiling tables
//! - [`ledger`]: consumable validation, selection and spending
//! - [`enhance`]: per-kind protocols and request/response shapes
//! - [`engine`]: the validate/gate/apply envelope
pub mod config;
pub mod engine;
pub mod enhance;
pub mod env;
pub mod error;
pub mod gate;
pub mod ledger;
pub mod state;

pub use config::{ForgeConfig, Odds};
pub use engine::{EnhanceOutcome, ForgeEngine};
pub use enhance::{
    Announcement, EligibilityError, EnhanceError, EnhanceFlags, EnhanceKind, EnhanceProtocol,
    EnhanceRequest, EnhanceResponse, Requester, ResourceError, ResultCode, ValidationError,
};
pub use env::{
    ChanceOracle, ConfigOracle, Env, ForgeEnv, IdAllocator, ItemTypeDefinition, ItemTypeOracle,
    OracleError, PcgChance, SuspicionOracle, compute_seed,
};
pub use error::{ErrorContext, ErrorSeverity, ForgeError};
pub use ledger::{Material, UnitFamily};
pub use state::{
    Blessing, EquipSlot, ForgeState, GemGrade, Item, ItemDelta, ItemFlags, ItemId, ItemPosition,
    ItemSort, ItemTypeId, OwnerId, Quality, RegionId, Socket,
};
