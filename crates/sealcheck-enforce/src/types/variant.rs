use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use sealcheck_core::types::TypeRef;

/// A variant of a contract: a concrete type name, optionally
/// pointer-qualified.
///
/// The canonical form is `Name` or `*Name`. Ordering compares canonical
/// forms, so the pointer marker takes part in the sort key and `*Zeta`
/// sorts before `Alpha`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct VariantId {
    pub name: String,
    pub pointer: bool,
}

impl VariantId {
    pub fn bare(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: false,
        }
    }

    pub fn pointer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pointer: true,
        }
    }

    /// Map a resolved case type to a variant of a contract declared in
    /// `module`. Types from other modules, builtins and multi-level pointers
    /// map to nothing.
    pub fn from_type(ty: &TypeRef, module: &str) -> Option<Self> {
        match ty {
            TypeRef::Named(n) if n.module == module => Some(Self::bare(n.name.clone())),
            TypeRef::Pointer(inner) => match inner.as_ref() {
                TypeRef::Named(n) if n.module == module => Some(Self::pointer(n.name.clone())),
                _ => None,
            },
            _ => None,
        }
    }

    fn canonical_chars(&self) -> impl Iterator<Item = char> + '_ {
        self.pointer.then_some('*').into_iter().chain(self.name.chars())
    }
}

impl fmt::Display for VariantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pointer {
            f.write_str("*")?;
        }
        f.write_str(&self.name)
    }
}

impl Ord for VariantId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.canonical_chars().cmp(other.canonical_chars())
    }
}

impl PartialOrd for VariantId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl From<VariantId> for String {
    fn from(v: VariantId) -> String {
        v.to_string()
    }
}

impl From<String> for VariantId {
    fn from(s: String) -> Self {
        match s.strip_prefix('*') {
            Some(name) => Self::pointer(name),
            None => Self::bare(s),
        }
    }
}

/// A variant as reported to users: `union.*Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedVariant {
    /// Short name (package clause) of the contract's module.
    pub module_short: String,
    pub variant: VariantId,
}

impl fmt::Display for QualifiedVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.module_short, self.variant)
    }
}
