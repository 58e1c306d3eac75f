//! Shared bootstrap utilities for forge hosts.
//!
//! Provides configuration loading, oracle assembly from content files, logging
//! setup and runtime wiring that can be reused by the `forge-server` binary or
//! by a game server embedding the forge.
pub mod config;
pub mod logging;
pub mod oracles;
pub mod setup;

pub use config::ServerConfig;
pub use logging::setup_logging;
pub use oracles::{ContentOracleFactory, OracleFactory};
pub use setup::ServerSetup;
