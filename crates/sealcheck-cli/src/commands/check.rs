use std::path::PathBuf;

use sealcheck_core::config::DefaultArmPolicy;
use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_enforce::types::{CheckInfo, CheckResult};
use sealcheck_output::OutputFormatter;

use super::load;

/// Run `sealcheck check [path]` -- report every incomplete type switch.
///
/// Exit codes: 0 when every switch is exhaustive, 1 when diagnostics were
/// reported, 2 when the analysis could not run.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    path: Option<PathBuf>,
    include_tests: bool,
    default_arm: Option<DefaultArmPolicy>,
) -> i32 {
    let (root, mut config) = match load::resolve_root("check", path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    if include_tests {
        config.include_tests = true;
    }
    if let Some(policy) = default_arm {
        config.default_arm = policy;
    }

    let modules = match load::load_modules("check", verbose, &root, &config) {
        Ok(m) => m,
        Err(code) => return code,
    };

    let engine = AnalysisEngine::with_config(&config);
    let result = match engine.check(&modules) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("sealcheck check: {e}");
            return 2;
        }
    };

    if verbose {
        eprintln!("{}", summary_line(&result.info));
    }

    output_result(formatter, &result)
}

fn summary_line(info: &CheckInfo) -> String {
    format!(
        "sealcheck check: {} contract(s), {} site(s) checked, {} skipped by intentional default, {} ignored",
        info.contracts, info.sites_checked, info.sites_skipped_default, info.sites_ignored,
    )
}

fn output_result(formatter: &dyn OutputFormatter, result: &CheckResult) -> i32 {
    let output = formatter.format_check(result);
    if !output.is_empty() {
        print!("{}", output);
    }
    if result.diagnostics.is_empty() {
        0
    } else {
        1
    }
}
