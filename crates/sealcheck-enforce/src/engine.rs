use std::collections::HashSet;

use rayon::prelude::*;
use sealcheck_core::config::SealcheckConfig;
use sealcheck_core::oracle::TypeOracle;
use sealcheck_core::types::ModuleIndex;
use sealcheck_core::universe::TypeUniverse;

use crate::classify::DefaultArmClassifier;
use crate::dispatch::match_site;
use crate::exhaustive::{check_site, SiteOutcome};
use crate::facts::{FactScope, FactStore};
use crate::graph::ModuleGraph;
use crate::scanner::scan_contracts;
use crate::suppress::IgnoreList;
use crate::types::{
    AnalysisError, CheckInfo, CheckResult, Contract, Diagnostic, FactEntry, FactsResult,
};
use crate::variants::build_variant_set;

/// Core analysis engine. One call to [`check`](Self::check) is one run:
/// facts live only for its duration.
pub struct AnalysisEngine {
    config: SealcheckConfig,
    ignored: IgnoreList,
}

/// What one module contributed to a run.
#[derive(Default)]
struct ModuleReport {
    contracts: u32,
    sites: u32,
    checked: u32,
    defaulted: u32,
    ignored: u32,
    diagnostics: Vec<Diagnostic>,
}

impl Default for AnalysisEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisEngine {
    pub fn new() -> Self {
        Self::with_config(&SealcheckConfig::default())
    }

    /// Create an engine configured from a `SealcheckConfig`.
    pub fn with_config(config: &SealcheckConfig) -> Self {
        Self {
            config: config.clone(),
            ignored: IgnoreList::from_entries(&config.ignore_contracts),
        }
    }

    /// Discover contracts and check every type switch in `modules`.
    ///
    /// Modules are processed level by level in dependency order; modules of
    /// one level run in parallel, each exporting its facts before checking
    /// its own switches.
    pub fn check(&self, modules: &[ModuleIndex]) -> Result<CheckResult, AnalysisError> {
        let universe = TypeUniverse::build(modules);
        let graph = ModuleGraph::build(modules);
        let store = FactStore::new();

        let mut info = CheckInfo::default();
        let mut diagnostics = Vec::new();
        for level in graph.levels()? {
            let reports: Vec<ModuleReport> = level
                .par_iter()
                .map(|&pos| {
                    let visible = graph.visible_modules(pos);
                    self.run_module(&modules[pos], &universe, &store, &visible)
                })
                .collect::<Result<_, _>>()?;
            for report in reports {
                info.contracts += report.contracts;
                info.dispatch_sites += report.sites;
                info.sites_checked += report.checked;
                info.sites_skipped_default += report.defaulted;
                info.sites_ignored += report.ignored;
                diagnostics.extend(report.diagnostics);
            }
        }

        diagnostics.sort_by(|a, b| {
            (&a.file, a.line, a.column, &a.message).cmp(&(&b.file, b.line, b.column, &b.message))
        });
        let status = if diagnostics.is_empty() { "ok" } else { "error" };
        Ok(CheckResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "check".to_string(),
            status: status.to_string(),
            modules_analyzed: modules.len() as u32,
            diagnostics,
            info,
        })
    }

    /// Discover contracts only; returns every fact with its declaration site.
    pub fn discover(&self, modules: &[ModuleIndex]) -> Result<FactsResult, AnalysisError> {
        let universe = TypeUniverse::build(modules);
        let store = FactStore::new();

        let found: Vec<Vec<Contract>> = modules
            .par_iter()
            .map(|module| -> Result<Vec<Contract>, AnalysisError> {
                let contracts = scan_contracts(module, &universe);
                let facts = contracts
                    .iter()
                    .map(|c| build_variant_set(c, module, &universe))
                    .collect();
                store.export_batch(facts)?;
                Ok(contracts)
            })
            .collect::<Result<_, _>>()?;

        let mut facts: Vec<FactEntry> = found
            .into_iter()
            .flatten()
            .filter_map(|contract| {
                let fact = store.import(&contract.name)?;
                Some(FactEntry {
                    contract: contract.name,
                    module_name: contract.module_name,
                    file: contract.file,
                    line: contract.line,
                    discriminator: fact.discriminator.clone(),
                    variants: fact.variants.clone(),
                    fingerprint: fact.fingerprint.clone(),
                })
            })
            .collect();
        facts.sort_by(|a, b| a.contract.cmp(&b.contract));

        Ok(FactsResult {
            version: env!("CARGO_PKG_VERSION").to_string(),
            command: "facts".to_string(),
            modules_analyzed: modules.len() as u32,
            facts,
        })
    }

    /// Phase 1 (scan, build, export) then phase 2 (match, classify, check)
    /// for one module.
    fn run_module(
        &self,
        module: &ModuleIndex,
        oracle: &dyn TypeOracle,
        store: &FactStore,
        visible: &HashSet<String>,
    ) -> Result<ModuleReport, AnalysisError> {
        let contracts = scan_contracts(module, oracle);
        let facts = contracts
            .iter()
            .map(|c| build_variant_set(c, module, oracle))
            .collect();
        store.export_batch(facts)?;

        let mut report = ModuleReport {
            contracts: contracts.len() as u32,
            sites: module.sites.len() as u32,
            ..ModuleReport::default()
        };
        let scope = FactScope::new(store, visible);
        let classifier = DefaultArmClassifier::with_config(oracle, &self.config);
        for site in &module.sites {
            let Some(matched) = match_site(site, &scope) else {
                continue;
            };
            if self
                .ignored
                .is_ignored(&matched.fact.contract, &matched.fact.module_name)
            {
                report.ignored += 1;
                continue;
            }
            report.checked += 1;
            match check_site(&matched, &classifier) {
                SiteOutcome::Complete => {}
                SiteOutcome::Defaulted => report.defaulted += 1,
                SiteOutcome::Incomplete(diagnostic) => report.diagnostics.push(diagnostic),
            }
        }
        Ok(report)
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
