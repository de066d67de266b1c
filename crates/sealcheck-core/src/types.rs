use serde::{Deserialize, Serialize};

/// A qualified symbol: import path of the declaring package plus the type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
    pub module: String,
    pub name: String,
}

impl TypeName {
    pub fn new(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            name: name.into(),
        }
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.module, self.name)
    }
}

/// A statically resolved type as supplied by the host frontend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeRef {
    /// A declared (defined) type.
    Named(TypeName),
    /// Pointer to another type.
    Pointer(Box<TypeRef>),
    /// A predeclared type such as `error`, `int` or `string`.
    Builtin(String),
}

impl TypeRef {
    pub fn named(module: impl Into<String>, name: impl Into<String>) -> Self {
        TypeRef::Named(TypeName::new(module, name))
    }

    pub fn builtin(name: impl Into<String>) -> Self {
        TypeRef::Builtin(name.into())
    }

    /// Wrap this type in a pointer.
    pub fn pointer_to(self) -> Self {
        TypeRef::Pointer(Box::new(self))
    }

    pub fn as_named(&self) -> Option<&TypeName> {
        match self {
            TypeRef::Named(n) => Some(n),
            _ => None,
        }
    }

    /// The pointee of a pointer type.
    pub fn pointee(&self) -> Option<&TypeRef> {
        match self {
            TypeRef::Pointer(inner) => Some(inner),
            _ => None,
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        matches!(self, TypeRef::Builtin(b) if b == name)
    }
}

impl std::fmt::Display for TypeRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeRef::Named(n) => write!(f, "{n}"),
            TypeRef::Pointer(inner) => write!(f, "*{inner}"),
            TypeRef::Builtin(b) => f.write_str(b),
        }
    }
}

/// In Go, a name is exported when its first character is an uppercase letter.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// A method signature reduced to what structural matching needs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MethodSig {
    pub name: String,
    pub params: u32,
    pub results: u32,
}

impl MethodSig {
    pub fn new(name: impl Into<String>, params: u32, results: u32) -> Self {
        Self {
            name: name.into(),
            params,
            results,
        }
    }

    pub fn is_exported(&self) -> bool {
        is_exported(&self.name)
    }
}

/// An embedded field of a struct or an embedded interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embedded {
    pub ty: TypeRef,
}

/// Shape of a top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum TypeDeclKind {
    /// `type X interface { ... }`: declared methods plus embedded interfaces.
    Interface {
        methods: Vec<MethodSig>,
        embeds: Vec<Embedded>,
    },
    /// `type X struct { ... }`: only embedded fields matter for method sets.
    Struct { embeds: Vec<Embedded> },
    /// Any other defined type (`type Color int`, `type Handler func()`).
    Other,
}

/// A module-level type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeDeclKind,
    pub file: String,
    pub line: u32,
}

impl TypeDecl {
    pub fn is_interface(&self) -> bool {
        matches!(self.kind, TypeDeclKind::Interface { .. })
    }
}

/// A method declared with a receiver of a module-level type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDecl {
    /// Receiver base type name (without `*`).
    pub receiver: String,
    pub pointer_receiver: bool,
    pub sig: MethodSig,
}

/// Source position (1-based line and byte column).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SourcePos {
    pub file: String,
    pub line: u32,
    pub column: u32,
}

impl std::fmt::Display for SourcePos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A result expression of a `return` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnValue {
    /// The expression is the literal `nil`.
    pub nil_literal: bool,
    /// Statically resolved type, when the host could resolve it.
    pub ty: Option<TypeRef>,
}

/// A statement in a default arm, reduced to what classification inspects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum Stmt {
    /// Expression statement that is a call; `callee` is the callee source text.
    Call { callee: String },
    Return { results: Vec<ReturnValue> },
    Other,
}

/// One `case` clause. `None` entries are types the host could not resolve.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CaseArm {
    pub types: Vec<Option<TypeRef>>,
}

/// The `default` clause of a type switch.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DefaultArm {
    pub body: Vec<Stmt>,
}

/// One type switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DispatchSite {
    pub pos: SourcePos,
    /// Static type of the expression under `.(type)`.
    pub scrutinee: Option<TypeRef>,
    pub arms: Vec<CaseArm>,
    pub default: Option<DefaultArm>,
}

/// Everything the engine needs to know about one module (a Go package).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModuleIndex {
    /// Import path; the module identity.
    pub path: String,
    /// Package clause name; used to qualify reported variants.
    pub name: String,
    pub files: Vec<String>,
    /// Import paths referenced by any file of the module.
    pub imports: Vec<String>,
    pub types: Vec<TypeDecl>,
    pub methods: Vec<MethodDecl>,
    pub sites: Vec<DispatchSite>,
}

impl ModuleIndex {
    pub fn new(path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn type_name(&self, name: &str) -> TypeName {
        TypeName::new(self.path.clone(), name)
    }
}
