//! Output formatters for sealcheck command results.
//!
//! Provides two output modes:
//! - **Human** (default): `file:line:col: message` lines, like a compiler
//! - **JSON** (`--json`): Machine-readable structured output

pub mod human;
pub(crate) mod human_helpers;
pub mod json;

use sealcheck_enforce::types::{CheckResult, FactsResult};

pub trait OutputFormatter {
    fn format_check(&self, result: &CheckResult) -> String;
    fn format_facts(&self, result: &FactsResult) -> String;
}
