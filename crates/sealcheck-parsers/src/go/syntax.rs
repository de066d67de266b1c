//! Syntactic records extracted from one Go file, before type resolution.
//!
//! Tree-sitter trees borrow the source buffer, so everything the resolver needs
//! is copied into these owned structures and the tree is dropped per file.

/// A type as written in source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeExpr {
    /// Unqualified name: a package-level type or a predeclared one.
    Name(String),
    /// `pkg.Name`, where `pkg` is an import alias.
    Qualified(String, String),
    Pointer(Box<TypeExpr>),
    /// Slices, maps, channels, function types, literals: never a contract.
    Other,
}

/// An expression reduced to what static typing of scrutinees and return
/// values needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Ident(String),
    Nil,
    Selector(Box<Expr>, String),
    Call { func: Box<Expr>, args: Vec<Expr> },
    /// `T{...}`
    Composite(TypeExpr),
    /// `&x`
    AddrOf(Box<Expr>),
    /// `*x`
    Deref(Box<Expr>),
    /// `x.(T)`
    TypeAssert(Box<Expr>, TypeExpr),
    /// A type used in argument position, as in `new(T)`.
    TypeOperand(TypeExpr),
    /// Basic literal; holds the predeclared type name.
    Literal(&'static str),
    Unknown,
}

/// How a local name got its type.
#[derive(Debug, Clone, PartialEq)]
pub enum Binding {
    Typed(TypeExpr),
    Value(Expr),
    /// The `n`-th value of a multi-value expression (`a, err := f()`).
    Nth(Expr, usize),
    /// Declared, but nothing useful is known (range variables, closures).
    Unknown,
}

/// Lexical bindings visible at a point, innermost last.
pub type Scope = Vec<(String, Binding)>;

/// Look up the innermost binding for `name`, with its position in `scope`.
///
/// Everything before that position is what was visible when the binding was
/// introduced.
pub fn lookup<'a>(scope: &'a [(String, Binding)], name: &str) -> Option<(usize, &'a Binding)> {
    scope
        .iter()
        .rposition(|(n, _)| n == name)
        .map(|i| (i, &scope[i].1))
}

#[derive(Debug, Clone)]
pub struct RawMethodSig {
    pub name: String,
    pub params: u32,
    pub results: u32,
}

#[derive(Debug, Clone)]
pub enum RawTypeKind {
    Interface {
        methods: Vec<RawMethodSig>,
        embeds: Vec<TypeExpr>,
    },
    Struct {
        /// Named fields: field name -> type.
        fields: Vec<(String, TypeExpr)>,
        embeds: Vec<TypeExpr>,
    },
    Other,
}

#[derive(Debug, Clone)]
pub struct RawTypeDecl {
    pub name: String,
    pub kind: RawTypeKind,
    pub line: u32,
}

#[derive(Debug, Clone)]
pub struct RawMethod {
    pub receiver: String,
    pub pointer_receiver: bool,
    pub sig: RawMethodSig,
    pub result_types: Vec<TypeExpr>,
}

#[derive(Debug, Clone)]
pub struct RawFunc {
    pub name: String,
    pub result_types: Vec<TypeExpr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RawStmt {
    Call { callee: String },
    Return { results: Vec<Expr> },
    Other,
}

#[derive(Debug, Clone)]
pub struct RawDefault {
    pub body: Vec<RawStmt>,
    /// Bindings visible at the end of the arm.
    pub scope: Scope,
}

#[derive(Debug, Clone)]
pub struct RawSite {
    pub line: u32,
    pub column: u32,
    pub scope: Scope,
    pub scrutinee: Expr,
    /// One entry per type listed in a `case`; `nil` entries are dropped.
    pub arms: Vec<Vec<TypeExpr>>,
    pub default: Option<RawDefault>,
}

/// One import spec. `alias` is the explicit name (`_`, `.` or an identifier).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawImport {
    pub alias: Option<String>,
    pub path: String,
}

/// Everything extracted from a single `.go` file.
#[derive(Debug, Clone, Default)]
pub struct RawFile {
    pub path: String,
    pub package: String,
    pub imports: Vec<RawImport>,
    pub types: Vec<RawTypeDecl>,
    pub methods: Vec<RawMethod>,
    pub funcs: Vec<RawFunc>,
    /// Package-level variables.
    pub vars: Vec<(String, Binding)>,
    pub sites: Vec<RawSite>,
}
