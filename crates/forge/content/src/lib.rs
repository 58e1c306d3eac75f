//! Data-driven reference data and loaders.
//!
//! This crate provides loaders for the RON/TOML files the forge reads once at
//! startup:
//! - Item type catalog with level and quality transitions (RON)
//! - Anti-cheat list of suspicious items (RON)
//! - Balance configuration (TOML)
//!
//! Content is consumed by runtime oracles and never appears in item state.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    ConfigLoader, ContentFactory, ItemTypeCatalog, ItemTypeLoader, LoadResult, SuspiciousList,
    SuspiciousLoader,
};
