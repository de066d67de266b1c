use sealcheck_core::types::TypeName;

/// Failures that abort an analysis run.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    /// A second fact was exported for a contract. Each contract is discovered
    /// once per run, so this means the input declared it twice.
    #[error("duplicate variant-set fact for contract {0}")]
    DuplicateFact(TypeName),
    #[error("import cycle between modules: {}", .0.join(" -> "))]
    ImportCycle(Vec<String>),
}
