//! Go frontend for sealcheck.
//!
//! Walks a source tree, parses `.go` files with tree-sitter and resolves them
//! into [`ModuleIndex`](sealcheck_core::types::ModuleIndex)es, one per package.

pub mod go;
pub mod treesitter;
pub mod walker;
