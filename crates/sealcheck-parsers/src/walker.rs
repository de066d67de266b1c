use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;

use crate::treesitter::is_go_source;

/// Per-directory ignore file honored in addition to `.gitignore`.
pub const IGNORE_FILE: &str = ".sealcheckignore";

pub struct WalkEntry {
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub relative: String,
}

pub struct FileWalker {
    root: PathBuf,
    include_tests: bool,
    exclude: GlobSet,
}

impl FileWalker {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            include_tests: false,
            exclude: GlobSet::empty(),
        }
    }

    pub fn include_tests(mut self, include: bool) -> Self {
        self.include_tests = include;
        self
    }

    /// Skip files whose root-relative path matches any of `patterns`.
    /// Invalid patterns are reported and ignored.
    pub fn exclude(mut self, patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => eprintln!("sealcheck: warning: invalid exclude pattern {pattern:?}: {e}"),
            }
        }
        self.exclude = builder.build().unwrap_or_else(|_| GlobSet::empty());
        self
    }

    /// Go source files under the root, sorted by relative path.
    pub fn walk(&self) -> Vec<WalkEntry> {
        let mut entries = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .hidden(true)
            .git_ignore(true)
            .git_global(false)
            .git_exclude(true)
            .add_custom_ignore_filename(IGNORE_FILE)
            .build();

        for result in walker {
            let entry = match result {
                Ok(e) => e,
                Err(_) => continue,
            };

            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }

            let path = entry.into_path();
            if !is_go_source(&path) {
                continue;
            }
            if !self.include_tests && is_test_file(&path) {
                continue;
            }
            let relative = path
                .strip_prefix(&self.root)
                .unwrap_or(&path)
                .to_string_lossy()
                .replace('\\', "/");
            if self.exclude.is_match(&relative) {
                continue;
            }
            entries.push(WalkEntry { path, relative });
        }

        entries.sort_by(|a, b| a.relative.cmp(&b.relative));
        entries
    }
}

fn is_test_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.ends_with("_test.go"))
}
