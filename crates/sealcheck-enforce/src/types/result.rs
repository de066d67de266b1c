use serde::{Deserialize, Serialize};
use sealcheck_core::types::TypeName;

use super::VariantId;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckResult {
    pub version: String,
    pub command: String,
    pub status: String, // "ok" | "error"
    pub modules_analyzed: u32,
    pub diagnostics: Vec<Diagnostic>,
    pub info: CheckInfo,
}

/// One incomplete type switch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub file: String,
    pub line: u32,
    pub column: u32,
    pub contract: TypeName,
    /// Missing variants in variant order, qualified as `union.*Error`.
    pub missing: Vec<String>,
    pub message: String,
    /// Fingerprint of the fact the switch was checked against.
    pub fingerprint: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CheckInfo {
    pub contracts: u32,
    pub dispatch_sites: u32,
    pub sites_checked: u32,
    /// Sites skipped because their default arm is intentional.
    pub sites_skipped_default: u32,
    /// Sites over contracts listed in `ignore_contracts`.
    #[serde(default)]
    pub sites_ignored: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactsResult {
    pub version: String,
    pub command: String,
    pub modules_analyzed: u32,
    pub facts: Vec<FactEntry>,
}

/// A discovered contract with its variant set, as listed by `facts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactEntry {
    pub contract: TypeName,
    pub module_name: String,
    pub file: String,
    pub line: u32,
    pub discriminator: String,
    pub variants: Vec<VariantId>,
    pub fingerprint: String,
}
