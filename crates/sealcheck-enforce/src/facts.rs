//! In-run fact store for variant-set facts.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use sealcheck_core::types::TypeName;

use crate::types::{AnalysisError, VariantSetFact};

/// Insert-once store of variant-set facts keyed by contract.
///
/// Shared by every worker of a run. Facts are never replaced or removed.
#[derive(Debug, Default)]
pub struct FactStore {
    facts: RwLock<HashMap<TypeName, Arc<VariantSetFact>>>,
}

impl FactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn export(&self, fact: VariantSetFact) -> Result<Arc<VariantSetFact>, AnalysisError> {
        let mut facts = self.export_batch(vec![fact])?;
        // A batch of one yields one fact.
        Ok(facts.remove(0))
    }

    /// Publish the facts of one module at once. Either every fact is stored
    /// or, on a duplicate, none is.
    pub fn export_batch(
        &self,
        batch: Vec<VariantSetFact>,
    ) -> Result<Vec<Arc<VariantSetFact>>, AnalysisError> {
        let mut facts = self.facts.write().unwrap_or_else(|e| e.into_inner());
        {
            let mut incoming = HashSet::new();
            for fact in &batch {
                if facts.contains_key(&fact.contract) || !incoming.insert(&fact.contract) {
                    return Err(AnalysisError::DuplicateFact(fact.contract.clone()));
                }
            }
        }
        Ok(batch
            .into_iter()
            .map(|fact| {
                let fact = Arc::new(fact);
                facts.insert(fact.contract.clone(), Arc::clone(&fact));
                fact
            })
            .collect())
    }

    pub fn import(&self, contract: &TypeName) -> Option<Arc<VariantSetFact>> {
        let facts = self.facts.read().unwrap_or_else(|e| e.into_inner());
        facts.get(contract).cloned()
    }

    /// Every stored fact, ordered by contract.
    pub fn all(&self) -> Vec<Arc<VariantSetFact>> {
        let facts = self.facts.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<_> = facts.values().cloned().collect();
        all.sort_by(|a, b| a.contract.cmp(&b.contract));
        all
    }

    pub fn len(&self) -> usize {
        self.facts.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The facts one module may import: those of contracts declared in the
/// module itself or in one of its transitive dependencies.
pub struct FactScope<'a> {
    store: &'a FactStore,
    visible: &'a HashSet<String>,
}

impl<'a> FactScope<'a> {
    pub fn new(store: &'a FactStore, visible: &'a HashSet<String>) -> Self {
        Self { store, visible }
    }

    pub fn import(&self, contract: &TypeName) -> Option<Arc<VariantSetFact>> {
        if !self.visible.contains(&contract.module) {
            return None;
        }
        self.store.import(contract)
    }
}
