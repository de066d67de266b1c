//! Exhaustiveness checker.

use crate::classify::{DefaultArmClassifier, DefaultVerdict};
use crate::dispatch::MatchedSite;
use crate::types::{Diagnostic, VariantId, VariantSetFact};
use std::collections::BTreeSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SiteOutcome {
    /// Every variant has an arm.
    Complete,
    /// An intentional default arm covers the rest.
    Defaulted,
    Incomplete(Diagnostic),
}

/// Variants of `fact` without an arm, in variant order.
pub fn missing_variants(fact: &VariantSetFact, handled: &BTreeSet<VariantId>) -> Vec<VariantId> {
    fact.variants
        .iter()
        .filter(|v| !handled.contains(*v))
        .cloned()
        .collect()
}

pub fn check_site(matched: &MatchedSite<'_>, classifier: &DefaultArmClassifier<'_>) -> SiteOutcome {
    if let Some(default) = &matched.site.default {
        if classifier.classify(default) == DefaultVerdict::Intentional {
            return SiteOutcome::Defaulted;
        }
    }
    let missing = missing_variants(&matched.fact, &matched.handled);
    if missing.is_empty() {
        return SiteOutcome::Complete;
    }

    let fact = &matched.fact;
    let missing: Vec<String> = missing.iter().map(|v| fact.qualify(v).to_string()).collect();
    let message = format!(
        "missing cases in type switch on {}: {}",
        fact.contract.name,
        missing.join(", ")
    );
    let pos = &matched.site.pos;
    SiteOutcome::Incomplete(Diagnostic {
        file: pos.file.clone(),
        line: pos.line,
        column: pos.column,
        contract: fact.contract.clone(),
        missing,
        message,
        fingerprint: fact.fingerprint.clone(),
    })
}
