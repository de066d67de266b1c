//! Go build constraints.
//!
//! A file takes part in the build when its `_GOOS`/`_GOARCH` file name suffix
//! matches and its header constraint (`//go:build`, or legacy `// +build`
//! lines when there is none) holds for the build context.

use std::collections::HashSet;

use sealcheck_core::config::SealcheckConfig;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "arm", "arm64", "loong64", "mips", "mips64", "mips64le", "mipsle", "ppc64",
    "ppc64le", "riscv64", "s390x", "sparc64", "wasm",
];

const UNIX_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "linux",
    "netbsd", "openbsd", "solaris",
];

/// Target platform and tags that constraints are evaluated against.
#[derive(Debug, Clone)]
pub struct BuildContext {
    goos: String,
    goarch: String,
    tags: HashSet<String>,
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::host()
    }
}

impl BuildContext {
    /// The platform sealcheck itself runs on, no extra tags.
    pub fn host() -> Self {
        Self::new(host_goos(), host_goarch())
    }

    pub fn new(goos: impl Into<String>, goarch: impl Into<String>) -> Self {
        Self {
            goos: goos.into(),
            goarch: goarch.into(),
            tags: HashSet::new(),
        }
    }

    pub fn from_config(config: &SealcheckConfig) -> Self {
        let host = Self::host();
        let goos = config.goos.clone().unwrap_or(host.goos);
        let goarch = config.goarch.clone().unwrap_or(host.goarch);
        Self::new(goos, goarch).with_tags(&config.build_tags)
    }

    pub fn with_tags(mut self, tags: &[String]) -> Self {
        self.tags.extend(tags.iter().cloned());
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        if tag == self.goos || tag == self.goarch {
            return true;
        }
        match tag {
            "unix" => UNIX_OS.contains(&self.goos.as_str()),
            "linux" => self.goos == "android",
            "darwin" => self.goos == "ios",
            "solaris" => self.goos == "illumos",
            "gc" => true,
            t if t.starts_with("go1.") => true,
            t => self.tags.contains(t),
        }
    }

    /// Whether the file named `file_name` with contents `source` is built.
    /// A constraint that cannot be parsed is reported and treated as met.
    pub fn matches_file(&self, file_name: &str, source: &str) -> bool {
        if !self.matches_file_name(file_name) {
            return false;
        }
        match header_constraint(source) {
            Ok(Some(expr)) => expr.eval(&|tag| self.has_tag(tag)),
            Ok(None) => true,
            Err(line) => {
                eprintln!("sealcheck: warning: {file_name}: malformed build constraint {line:?}");
                true
            }
        }
    }

    /// `name_GOOS_GOARCH.go`, `name_GOOS.go` and `name_GOARCH.go`, with an
    /// optional `_test` before the extension.
    pub fn matches_file_name(&self, file_name: &str) -> bool {
        let base = file_name.rsplit('/').next().unwrap_or(file_name);
        let stem = base.strip_suffix(".go").unwrap_or(base);
        let stem = stem.strip_suffix("_test").unwrap_or(stem);
        let parts: Vec<&str> = stem.split('_').collect();
        let n = parts.len();
        if n >= 3 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
            return self.has_tag(parts[n - 2]) && self.has_tag(parts[n - 1]);
        }
        if n >= 2 {
            let last = parts[n - 1];
            if KNOWN_OS.contains(&last) || KNOWN_ARCH.contains(&last) {
                return self.has_tag(last);
            }
        }
        true
    }
}

fn host_goos() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

fn host_goarch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "x86" => "386",
        "aarch64" => "arm64",
        "powerpc64" => "ppc64",
        "loongarch64" => "loong64",
        "wasm32" => "wasm",
        other => other,
    }
}

/// A parsed constraint expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Constraint {
    Tag(String),
    Not(Box<Constraint>),
    And(Box<Constraint>, Box<Constraint>),
    Or(Box<Constraint>, Box<Constraint>),
}

impl Constraint {
    pub fn eval(&self, has_tag: &dyn Fn(&str) -> bool) -> bool {
        match self {
            Constraint::Tag(t) => has_tag(t),
            Constraint::Not(c) => !c.eval(has_tag),
            Constraint::And(a, b) => a.eval(has_tag) && b.eval(has_tag),
            Constraint::Or(a, b) => a.eval(has_tag) || b.eval(has_tag),
        }
    }
}

/// The constraint in the header of `source`: comment lines before the
/// package clause. `Err` carries the offending line.
pub fn header_constraint(source: &str) -> Result<Option<Constraint>, String> {
    let mut plus_build: Option<Constraint> = None;
    let mut in_block = false;
    for line in source.lines() {
        let line = line.trim();
        if in_block {
            in_block = !line.contains("*/");
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("/*") {
            in_block = !rest.contains("*/");
            continue;
        }
        let Some(comment) = line.strip_prefix("//") else {
            break;
        };
        if let Some(expr) = comment.strip_prefix("go:build") {
            if !expr.is_empty() && !expr.starts_with([' ', '\t']) {
                continue;
            }
            return parse_expr(expr).map(Some).ok_or_else(|| line.to_string());
        }
        if let Some(expr) = comment.trim_start().strip_prefix("+build") {
            let parsed = parse_plus_build(expr).ok_or_else(|| line.to_string())?;
            plus_build = Some(match plus_build {
                Some(prev) => Constraint::And(Box::new(prev), Box::new(parsed)),
                None => parsed,
            });
        }
    }
    Ok(plus_build)
}

/// `// +build a,b !c`: space-separated alternatives of comma-joined terms.
fn parse_plus_build(line: &str) -> Option<Constraint> {
    let mut alternatives = line.split_whitespace().map(|option| {
        let mut terms = option.split(',').map(|term| match term.strip_prefix('!') {
            Some(tag) if is_tag(tag) => Some(Constraint::Not(Box::new(Constraint::Tag(tag.into())))),
            None if is_tag(term) => Some(Constraint::Tag(term.into())),
            _ => None,
        });
        let first = terms.next()??;
        terms.try_fold(first, |acc, t| Some(Constraint::And(Box::new(acc), Box::new(t?))))
    });
    let first = alternatives.next()??;
    alternatives.try_fold(first, |acc, alt| Some(Constraint::Or(Box::new(acc), Box::new(alt?))))
}

fn is_tag(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_' || c == '.')
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Tag(String),
    Not,
    And,
    Or,
    Open,
    Close,
}

fn tokenize(expr: &str) -> Option<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        match c {
            ' ' | '\t' => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token::Open);
            }
            ')' => {
                chars.next();
                tokens.push(Token::Close);
            }
            '!' => {
                chars.next();
                tokens.push(Token::Not);
            }
            '&' | '|' => {
                chars.next();
                if chars.next().map(|(_, n)| n) != Some(c) {
                    return None;
                }
                tokens.push(if c == '&' { Token::And } else { Token::Or });
            }
            _ => {
                let mut end = start;
                while let Some(&(i, c)) = chars.peek() {
                    if c.is_alphanumeric() || c == '_' || c == '.' {
                        end = i + c.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                if end == start {
                    return None;
                }
                tokens.push(Token::Tag(expr[start..end].to_string()));
            }
        }
    }
    Some(tokens)
}

/// Precedence climbing: `||` binds loosest, then `&&`, then `!`.
fn parse_expr(expr: &str) -> Option<Constraint> {
    let tokens = tokenize(expr)?;
    let mut pos = 0;
    let parsed = parse_or(&tokens, &mut pos)?;
    (pos == tokens.len()).then_some(parsed)
}

fn parse_or(tokens: &[Token], pos: &mut usize) -> Option<Constraint> {
    let mut left = parse_and(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::Or) {
        *pos += 1;
        let right = parse_and(tokens, pos)?;
        left = Constraint::Or(Box::new(left), Box::new(right));
    }
    Some(left)
}

fn parse_and(tokens: &[Token], pos: &mut usize) -> Option<Constraint> {
    let mut left = parse_unary(tokens, pos)?;
    while tokens.get(*pos) == Some(&Token::And) {
        *pos += 1;
        let right = parse_unary(tokens, pos)?;
        left = Constraint::And(Box::new(left), Box::new(right));
    }
    Some(left)
}

fn parse_unary(tokens: &[Token], pos: &mut usize) -> Option<Constraint> {
    let token = tokens.get(*pos)?;
    *pos += 1;
    match token {
        Token::Not => Some(Constraint::Not(Box::new(parse_unary(tokens, pos)?))),
        Token::Open => {
            let inner = parse_or(tokens, pos)?;
            if tokens.get(*pos) != Some(&Token::Close) {
                return None;
            }
            *pos += 1;
            Some(inner)
        }
        Token::Tag(t) => Some(Constraint::Tag(t.clone())),
        _ => None,
    }
}
