use crate::OutputFormatter;
use sealcheck_enforce::types::{CheckResult, FactsResult};

pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn format_check(&self, result: &CheckResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
    fn format_facts(&self, result: &FactsResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_default()
    }
}
