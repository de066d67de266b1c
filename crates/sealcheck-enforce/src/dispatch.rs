//! Dispatch-site matcher.

use std::collections::BTreeSet;
use std::sync::Arc;

use sealcheck_core::types::{DispatchSite, TypeRef};

use crate::facts::FactScope;
use crate::types::{VariantId, VariantSetFact};

/// A type switch over a contract with a visible fact.
#[derive(Debug)]
pub struct MatchedSite<'s> {
    pub site: &'s DispatchSite,
    pub fact: Arc<VariantSetFact>,
    /// Variants named by case arms.
    pub handled: BTreeSet<VariantId>,
}

/// Look up the fact for the scrutinee's static type. Sites whose scrutinee
/// is unresolved, not a named type, or not a visible contract are skipped.
pub fn match_site<'s>(site: &'s DispatchSite, facts: &FactScope<'_>) -> Option<MatchedSite<'s>> {
    let Some(TypeRef::Named(contract)) = &site.scrutinee else {
        return None;
    };
    let fact = facts.import(contract)?;
    let handled = site
        .arms
        .iter()
        .flat_map(|arm| arm.types.iter().flatten())
        .filter_map(|ty| VariantId::from_type(ty, &fact.contract.module))
        .collect();
    Some(MatchedSite {
        site,
        fact,
        handled,
    })
}
