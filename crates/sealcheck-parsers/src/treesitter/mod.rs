use std::path::Path;

use tree_sitter::{Language, Parser, Tree};

use crate::go::extract::extract_file;
use crate::go::syntax::RawFile;

pub struct TreeSitterParser {
    parser: Parser,
}

impl TreeSitterParser {
    pub fn new() -> Self {
        Self {
            parser: Parser::new(),
        }
    }

    pub fn parse(&mut self, source: &[u8]) -> Result<Tree, ParseError> {
        let lang: Language = tree_sitter_go::LANGUAGE.into();
        self.parser
            .set_language(&lang)
            .map_err(|e| ParseError::Language(format!("{e}")))?;
        self.parser.parse(source, None).ok_or(ParseError::ParseFailed)
    }

    /// Parse one Go file and extract its declarations and type switches.
    ///
    /// `path` is recorded verbatim in positions. Files whose tree contains
    /// syntax errors are rejected rather than half-analyzed.
    pub fn parse_file(&mut self, path: &Path, source: &str) -> Result<RawFile, ParseError> {
        let tree = self.parse(source.as_bytes())?;
        let root = tree.root_node();
        if root.has_error() {
            let line = first_error_line(root).unwrap_or(1);
            return Err(ParseError::Syntax { line });
        }
        let file_path = path.to_string_lossy().replace('\\', "/");
        Ok(extract_file(&file_path, &tree, source))
    }
}

impl Default for TreeSitterParser {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("language error: {0}")]
    Language(String),
    #[error("parse failed")]
    ParseFailed,
    #[error("syntax error near line {line}")]
    Syntax { line: u32 },
}

/// Only `.go` sources are analyzed.
pub fn is_go_source(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("go")
}

fn first_error_line(node: tree_sitter::Node<'_>) -> Option<u32> {
    if node.is_error() || node.is_missing() {
        return Some(node.start_position().row as u32 + 1);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .filter(|c| c.has_error())
        .find_map(first_error_line)
}
