use std::collections::HashSet;

use sealcheck_core::types::TypeName;

/// Contracts excluded from checking.
///
/// Entries name a contract either by import path (`example.com/union.Shape`)
/// or by package short name (`union.Shape`).
#[derive(Debug, Default)]
pub struct IgnoreList {
    contracts: HashSet<String>,
}

impl IgnoreList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: &[String]) -> Self {
        let mut list = Self::new();
        for entry in entries {
            list.ignore(entry);
        }
        list
    }

    pub fn ignore(&mut self, contract: &str) {
        self.contracts.insert(contract.trim().to_string());
    }

    pub fn is_ignored(&self, contract: &TypeName, module_short: &str) -> bool {
        if self.contracts.is_empty() {
            return false;
        }
        self.contracts.contains(&contract.to_string())
            || self
                .contracts
                .contains(&format!("{module_short}.{}", contract.name))
    }

    /// Number of ignored contract names.
    pub fn count(&self) -> usize {
        self.contracts.len()
    }
}
