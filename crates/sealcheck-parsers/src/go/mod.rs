//! Go frontend: source tree to [`ModuleIndex`]es.
//!
//! - [`constraint`]: `//go:build` and file name build constraints
//! - [`syntax`]: owned records extracted from one file
//! - [`extract`]: tree-sitter-go walk producing those records
//! - [`resolve`]: package grouping context and local static typing

pub mod constraint;
pub mod extract;
pub mod resolve;
pub mod syntax;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use sealcheck_core::config::SealcheckConfig;
use sealcheck_core::types::ModuleIndex;

use crate::treesitter::{ParseError, TreeSitterParser};
use crate::walker::FileWalker;
use constraint::BuildContext;
use resolve::{resolve_packages, RawPackage};
use syntax::RawFile;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse { path: String, source: ParseError },
}

/// Loads every Go package under a root directory.
#[derive(Debug, Clone, Default)]
pub struct GoFrontend {
    include_tests: bool,
    exclude: Vec<String>,
    build: BuildContext,
}

impl GoFrontend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SealcheckConfig) -> Self {
        Self {
            include_tests: config.include_tests,
            exclude: config.exclude.clone(),
            build: BuildContext::from_config(config),
        }
    }

    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    pub fn build_context(mut self, build: BuildContext) -> Self {
        self.build = build;
        self
    }

    /// Walk, parse and resolve. Files excluded by build constraints are
    /// skipped. Files that fail to parse are reported on stderr and left
    /// out; unreadable files abort the load.
    ///
    /// Positions in the result are relative to `root`.
    pub fn load(&self, root: &Path) -> Result<Vec<ModuleIndex>, LoadError> {
        if !root.is_dir() {
            return Err(LoadError::NotADirectory(root.to_path_buf()));
        }
        let entries = FileWalker::new(root)
            .include_tests(self.include_tests)
            .exclude(&self.exclude)
            .walk();

        let parsed: Vec<Result<Option<RawFile>, LoadError>> = entries
            .par_iter()
            .map_init(TreeSitterParser::new, |parser, entry| {
                let source = std::fs::read_to_string(&entry.path).map_err(|source| LoadError::Io {
                    path: entry.path.clone(),
                    source,
                })?;
                if !self.build.matches_file(&entry.relative, &source) {
                    return Ok(None);
                }
                parser
                    .parse_file(Path::new(&entry.relative), &source)
                    .map(Some)
                    .map_err(|source| LoadError::Parse {
                        path: entry.relative.clone(),
                        source,
                    })
            })
            .collect();

        // (directory, package clause) -> files
        let mut groups: BTreeMap<(String, String), Vec<RawFile>> = BTreeMap::new();
        for (entry, result) in entries.iter().zip(parsed) {
            match result {
                Ok(None) => {}
                Ok(Some(file)) => {
                    let dir = match entry.relative.rsplit_once('/') {
                        Some((dir, _)) => dir.to_string(),
                        None => String::new(),
                    };
                    groups
                        .entry((dir, file.package.clone()))
                        .or_default()
                        .push(file);
                }
                Err(e @ LoadError::Parse { .. }) => eprintln!("sealcheck: warning: {e}"),
                Err(e) => return Err(e),
            }
        }

        let module_root = root.canonicalize().unwrap_or_else(|_| root.to_path_buf());
        let mut packages: Vec<RawPackage> = Vec::with_capacity(groups.len());
        let mut by_path: HashMap<String, usize> = HashMap::new();
        for ((dir, name), files) in groups {
            let mut path = package_path(&module_root, &dir, &name);
            if name.ends_with("_test") && !path.ends_with("_test") {
                path.push_str("_test");
            }
            let package = RawPackage { path, name, files };
            let Some(&pos) = by_path.get(&package.path) else {
                by_path.insert(package.path.clone(), packages.len());
                packages.push(package);
                continue;
            };
            // Same import path from two package clauses: keep the larger.
            let skipped = if package.files.len() > packages[pos].files.len() {
                std::mem::replace(&mut packages[pos], package)
            } else {
                package
            };
            let kept = &packages[pos];
            eprintln!(
                "sealcheck: warning: {}: found packages {} and {}, skipping {}",
                kept.path, kept.name, skipped.name, skipped.name
            );
        }

        Ok(resolve_packages(&packages))
    }
}

/// Import path of the package in `dir` (relative to `root`).
fn package_path(root: &Path, dir: &str, package: &str) -> String {
    let abs = if dir.is_empty() {
        root.to_path_buf()
    } else {
        root.join(dir)
    };
    for ancestor in abs.ancestors() {
        let Some(module) = read_module_line(&ancestor.join("go.mod")) else {
            continue;
        };
        let rel = abs
            .strip_prefix(ancestor)
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .unwrap_or_default();
        return if rel.is_empty() {
            module
        } else {
            format!("{module}/{rel}")
        };
    }
    if dir.is_empty() {
        package.to_string()
    } else {
        dir.to_string()
    }
}

/// The `module` directive of a go.mod file.
fn read_module_line(go_mod: &Path) -> Option<String> {
    let content = std::fs::read_to_string(go_mod).ok()?;
    content.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or("").trim();
        let module = line.strip_prefix("module")?;
        if !module.starts_with(char::is_whitespace) {
            return None;
        }
        let module = module.trim().trim_matches('"').trim_matches('`');
        (!module.is_empty()).then(|| module.to_string())
    })
}
