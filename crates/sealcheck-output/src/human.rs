use crate::human_helpers::{format_diagnostic_human, format_fact_human};
use crate::OutputFormatter;
use sealcheck_enforce::types::{CheckResult, FactsResult};

pub struct HumanFormatter;

impl OutputFormatter for HumanFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        if result.diagnostics.is_empty() {
            return String::new(); // Clean check = empty stdout
        }

        let mut out = String::new();
        for d in &result.diagnostics {
            out.push_str(&format_diagnostic_human(d));
        }

        let files = result
            .diagnostics
            .iter()
            .map(|d| d.file.as_str())
            .collect::<std::collections::BTreeSet<_>>()
            .len();
        out.push_str(&format!(
            "\n{} incomplete type switch(es) in {} file(s)\n",
            result.diagnostics.len(),
            files,
        ));
        out
    }

    fn format_facts(&self, result: &FactsResult) -> String {
        if result.facts.is_empty() {
            return format!(
                "no sealed interfaces in {} module(s)\n",
                result.modules_analyzed
            );
        }

        let mut out = String::new();
        for fact in &result.facts {
            out.push_str(&format_fact_human(fact));
        }
        out.push_str(&format!(
            "\n{} sealed interface(s) in {} module(s)\n",
            result.facts.len(),
            result.modules_analyzed,
        ));
        out
    }
}
