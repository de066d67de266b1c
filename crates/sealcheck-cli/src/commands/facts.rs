use std::path::PathBuf;

use sealcheck_enforce::engine::AnalysisEngine;
use sealcheck_output::OutputFormatter;

use super::load;

/// Run `sealcheck facts [path]` -- list sealed interfaces and their variants.
pub fn run(
    formatter: &dyn OutputFormatter,
    verbose: bool,
    path: Option<PathBuf>,
    include_tests: bool,
) -> i32 {
    let (root, mut config) = match load::resolve_root("facts", path) {
        Ok(r) => r,
        Err(code) => return code,
    };
    if include_tests {
        config.include_tests = true;
    }

    let modules = match load::load_modules("facts", verbose, &root, &config) {
        Ok(m) => m,
        Err(code) => return code,
    };

    match AnalysisEngine::with_config(&config).discover(&modules) {
        Ok(result) => {
            if verbose {
                eprintln!("sealcheck facts: {} sealed interface(s)", result.facts.len());
            }
            print!("{}", formatter.format_facts(&result));
            0
        }
        Err(e) => {
            eprintln!("sealcheck facts: {e}");
            2
        }
    }
}
