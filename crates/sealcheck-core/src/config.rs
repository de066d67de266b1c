//! Configuration file loading for sealcheck.
//!
//! Reads `sealcheck.json` from the analysis root and provides typed access to
//! all settings. Falls back to defaults when the file is missing or incomplete.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// File name looked up in the analysis root.
pub const CONFIG_FILE: &str = "sealcheck.json";

/// Top-level sealcheck configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SealcheckConfig {
    /// Analyze `_test.go` files as well.
    #[serde(default)]
    pub include_tests: bool,
    #[serde(default)]
    pub default_arm: DefaultArmPolicy,
    /// Callees whose call as the final statement of a default arm marks it as
    /// a safety guard.
    #[serde(default = "default_abort_functions")]
    pub abort_functions: Vec<String>,
    /// Contracts never checked, as `import/path.Name` or `pkg.Name`.
    #[serde(default)]
    pub ignore_contracts: Vec<String>,
    /// Glob patterns (relative to the root) of files to skip.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Extra tags satisfied when evaluating `//go:build` constraints.
    #[serde(default)]
    pub build_tags: Vec<String>,
    /// Target platform for build constraints; the host's when unset.
    #[serde(default)]
    pub goos: Option<String>,
    #[serde(default)]
    pub goarch: Option<String>,
}

/// How a `default:` arm is classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultArmPolicy {
    /// Only the final statement decides.
    #[default]
    LastStatement,
    /// The arm must consist of exactly one guarding statement.
    SoleStatement,
}

fn default_abort_functions() -> Vec<String> {
    vec!["panic".to_string()]
}

impl Default for SealcheckConfig {
    fn default() -> Self {
        Self {
            include_tests: false,
            default_arm: DefaultArmPolicy::default(),
            abort_functions: default_abort_functions(),
            ignore_contracts: vec![],
            exclude: vec![],
            build_tags: vec![],
            goos: None,
            goarch: None,
        }
    }
}

impl SealcheckConfig {
    /// Load configuration from `sealcheck.json` inside `root`.
    /// Returns defaults if the file doesn't exist or can't be parsed.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&config_path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };
        match serde_json::from_str(&content) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!(
                    "sealcheck: warning: failed to parse {}: {}, using defaults",
                    config_path.display(),
                    e
                );
                Self::default()
            }
        }
    }
}
