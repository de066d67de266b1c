//! Exhaustiveness analysis for type switches over sealed interfaces.
//!
//! Phase 1 finds contracts and their variants and exports them as facts;
//! phase 2 checks every type switch against the fact for its scrutinee:
//! - [`scanner`]: sealed interface discovery
//! - [`variants`]: variant set construction
//! - [`facts`]: insert-once fact store with per-module visibility
//! - [`dispatch`]: matching type switches to facts
//! - [`classify`]: default-arm classification
//! - [`exhaustive`]: missing-variant diagnostics
//! - [`graph`]: module dependency order
//! - [`engine`]: the run driver

pub mod types;
pub mod scanner;
pub mod variants;
pub mod facts;
pub mod dispatch;
pub mod classify;
pub mod exhaustive;
pub mod graph;
pub mod suppress;
pub mod engine;
