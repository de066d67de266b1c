//! Core types, type oracle, and configuration for sealcheck.
//!
//! This crate provides the host-neutral foundation shared by all sealcheck crates:
//! - [`types`]: The module IR supplied by a host frontend (declarations, dispatch sites)
//! - [`oracle`]: The [`TypeOracle`](oracle::TypeOracle) trait the engine queries
//! - [`universe`]: Method-set implementation of the oracle over all loaded modules
//! - [`config`]: Configuration loading from `sealcheck.json`
//! - [`hash`]: Deterministic fact fingerprints (base62 of xxhash64)

pub mod config;
pub mod hash;
pub mod oracle;
pub mod types;
pub mod universe;
