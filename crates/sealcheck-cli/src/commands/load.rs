//! Shared front half of every analyzing command: root, config, modules.

use std::path::{Path, PathBuf};

use sealcheck_core::config::SealcheckConfig;
use sealcheck_core::types::ModuleIndex;
use sealcheck_parsers::go::GoFrontend;

/// Resolve `path` (default: current directory) and read `sealcheck.json` from it.
pub fn resolve_root(cmd: &str, path: Option<PathBuf>) -> Result<(PathBuf, SealcheckConfig), i32> {
    let root = match path {
        Some(p) => p,
        None => match std::env::current_dir() {
            Ok(p) => p,
            Err(e) => {
                eprintln!("sealcheck {cmd}: failed to get current directory: {e}");
                return Err(2);
            }
        },
    };
    if !root.is_dir() {
        eprintln!("sealcheck {cmd}: {} is not a directory", root.display());
        return Err(2);
    }
    let config = SealcheckConfig::load(&root);
    Ok((root, config))
}

/// Parse and resolve every package under `root`.
pub fn load_modules(
    cmd: &str,
    verbose: bool,
    root: &Path,
    config: &SealcheckConfig,
) -> Result<Vec<ModuleIndex>, i32> {
    let frontend = GoFrontend::from_config(config);
    match frontend.load(root) {
        Ok(modules) => {
            if verbose {
                let sites: usize = modules.iter().map(|m| m.sites.len()).sum();
                eprintln!(
                    "sealcheck {cmd}: loaded {} module(s), {} type switch(es)",
                    modules.len(),
                    sites
                );
            }
            Ok(modules)
        }
        Err(e) => {
            eprintln!("sealcheck {cmd}: {e}");
            Err(2)
        }
    }
}
