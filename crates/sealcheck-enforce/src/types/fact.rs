use serde::{Deserialize, Serialize};
use sealcheck_core::hash::compute_fingerprint;
use sealcheck_core::types::TypeName;

use super::{QualifiedVariant, VariantId};

/// A sealed interface found by the declaration scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub name: TypeName,
    /// Package clause name of the declaring module.
    pub module_name: String,
    pub discriminator: String,
    pub file: String,
    pub line: u32,
}

/// Immutable record of a contract's discriminator and variants, shared with
/// every module that can see the contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSetFact {
    pub contract: TypeName,
    pub module_name: String,
    pub discriminator: String,
    /// Sorted by canonical form, no duplicates.
    pub variants: Vec<VariantId>,
    pub fingerprint: String,
}

impl VariantSetFact {
    pub fn new(contract: &Contract, mut variants: Vec<VariantId>) -> Self {
        variants.sort();
        variants.dedup();
        let canonical: Vec<String> = variants.iter().map(|v| v.to_string()).collect();
        let fingerprint =
            compute_fingerprint(&contract.name.to_string(), &contract.discriminator, &canonical);
        Self {
            contract: contract.name.clone(),
            module_name: contract.module_name.clone(),
            discriminator: contract.discriminator.clone(),
            variants,
            fingerprint,
        }
    }

    pub fn qualify(&self, variant: &VariantId) -> QualifiedVariant {
        QualifiedVariant {
            module_short: self.module_name.clone(),
            variant: variant.clone(),
        }
    }
}
