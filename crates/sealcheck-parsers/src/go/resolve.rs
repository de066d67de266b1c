//! Local static typing over extracted Go packages.
//!
//! Turns [`RawFile`]s grouped by package into [`ModuleIndex`]es: type
//! expressions are qualified against each file's imports, and scrutinees and
//! return values are typed from declarations, local bindings and call results.
//! Anything this cannot type stays `None`, which the engine treats as unknown.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use sealcheck_core::types::{
    CaseArm, DefaultArm, DispatchSite, Embedded, MethodDecl, MethodSig, ModuleIndex, ReturnValue,
    SourcePos, Stmt, TypeDecl, TypeDeclKind, TypeName, TypeRef,
};

use super::syntax::{
    lookup, Binding, Expr, RawFile, RawFunc, RawMethod, RawMethodSig, RawStmt, RawTypeDecl,
    RawTypeKind, TypeExpr,
};

/// Nesting limit for following bindings and call results.
const MAX_DEPTH: usize = 16;

const PREDECLARED: &[&str] = &[
    "any", "bool", "byte", "comparable", "complex64", "complex128", "error", "float32",
    "float64", "int", "int8", "int16", "int32", "int64", "rune", "string", "uint", "uint8",
    "uint16", "uint32", "uint64", "uintptr",
];

/// Files of one Go package, before resolution.
#[derive(Debug, Clone)]
pub struct RawPackage {
    /// Import path.
    pub path: String,
    /// Package clause name.
    pub name: String,
    pub files: Vec<RawFile>,
}

/// Resolve every package. Output order follows input order.
///
/// Each package resolves against its own declarations even when two share an
/// import path; imports of a shared path see the first of them.
pub fn resolve_packages(packages: &[RawPackage]) -> Vec<ModuleIndex> {
    let resolver = Resolver::new(packages);
    (0..packages.len())
        .into_par_iter()
        .map(|pos| resolver.module_index(pos))
        .collect()
}

struct PackageInfo<'a> {
    raw: &'a RawPackage,
    types: HashMap<&'a str, (usize, &'a RawTypeDecl)>,
    funcs: HashMap<&'a str, (usize, &'a RawFunc)>,
    /// Receiver name -> method name -> declaration.
    methods: HashMap<&'a str, HashMap<&'a str, (usize, &'a RawMethod)>>,
    vars: HashMap<&'a str, (usize, &'a Binding)>,
    /// Per file: import alias -> import path.
    aliases: Vec<HashMap<String, String>>,
    /// Per file: dot-imported paths.
    dot_imports: Vec<Vec<String>>,
}

#[derive(Clone, Copy)]
struct Ctx<'r> {
    pkg: &'r PackageInfo<'r>,
    file: usize,
}

struct Resolver<'a> {
    packages: Vec<PackageInfo<'a>>,
    /// Import path -> position of the first package with that path.
    by_path: HashMap<&'a str, usize>,
}

impl<'a> Resolver<'a> {
    fn new(packages: &'a [RawPackage]) -> Self {
        let mut names: HashMap<&str, &str> = HashMap::new();
        for p in packages {
            names.entry(p.path.as_str()).or_insert(p.name.as_str());
        }

        let mut infos = Vec::with_capacity(packages.len());
        let mut by_path = HashMap::new();
        for (pos, raw) in packages.iter().enumerate() {
            by_path.entry(raw.path.as_str()).or_insert(pos);
            let mut info = PackageInfo {
                raw,
                types: HashMap::new(),
                funcs: HashMap::new(),
                methods: HashMap::new(),
                vars: HashMap::new(),
                aliases: Vec::with_capacity(raw.files.len()),
                dot_imports: Vec::with_capacity(raw.files.len()),
            };
            for (idx, file) in raw.files.iter().enumerate() {
                for decl in &file.types {
                    info.types.insert(decl.name.as_str(), (idx, decl));
                }
                for func in &file.funcs {
                    info.funcs.insert(func.name.as_str(), (idx, func));
                }
                for method in &file.methods {
                    info.methods
                        .entry(method.receiver.as_str())
                        .or_default()
                        .insert(method.sig.name.as_str(), (idx, method));
                }
                for (name, binding) in &file.vars {
                    info.vars.insert(name.as_str(), (idx, binding));
                }

                let mut aliases = HashMap::new();
                let mut dots = Vec::new();
                for import in &file.imports {
                    match import.alias.as_deref() {
                        Some("_") => {}
                        Some(".") => dots.push(import.path.clone()),
                        Some(alias) => {
                            aliases.insert(alias.to_string(), import.path.clone());
                        }
                        None => {
                            let alias = names
                                .get(import.path.as_str())
                                .map(|n| n.to_string())
                                .unwrap_or_else(|| default_alias(&import.path));
                            aliases.insert(alias, import.path.clone());
                        }
                    }
                }
                info.aliases.push(aliases);
                info.dot_imports.push(dots);
            }
            infos.push(info);
        }
        Self {
            packages: infos,
            by_path,
        }
    }

    fn module_index(&self, pos: usize) -> ModuleIndex {
        let pkg = &self.packages[pos];
        let raw = pkg.raw;
        let mut module = ModuleIndex::new(raw.path.clone(), raw.name.clone());

        let mut imports = BTreeSet::new();
        for (idx, file) in raw.files.iter().enumerate() {
            let ctx = Ctx { pkg, file: idx };
            module.files.push(file.path.clone());
            imports.extend(file.imports.iter().map(|i| i.path.clone()));

            for decl in &file.types {
                module.types.push(self.type_decl(ctx, decl, &file.path));
            }
            for method in &file.methods {
                module.methods.push(MethodDecl {
                    receiver: method.receiver.clone(),
                    pointer_receiver: method.pointer_receiver,
                    sig: method_sig(&method.sig),
                });
            }
            for site in &file.sites {
                let scrutinee = self.type_of(ctx, &site.scope, &site.scrutinee, 0);
                let arms = site
                    .arms
                    .iter()
                    .map(|types| CaseArm {
                        types: types.iter().map(|t| self.resolve_type(ctx, t)).collect(),
                    })
                    .collect();
                let default = site.default.as_ref().map(|d| DefaultArm {
                    body: d
                        .body
                        .iter()
                        .map(|stmt| self.stmt(ctx, &d.scope, stmt))
                        .collect(),
                });
                module.sites.push(DispatchSite {
                    pos: SourcePos {
                        file: file.path.clone(),
                        line: site.line,
                        column: site.column,
                    },
                    scrutinee,
                    arms,
                    default,
                });
            }
        }
        imports.remove(raw.path.as_str());
        module.imports = imports.into_iter().collect();
        module
    }

    fn type_decl(&self, ctx: Ctx<'_>, decl: &RawTypeDecl, file: &str) -> TypeDecl {
        let embeds = |list: &[TypeExpr]| -> Vec<Embedded> {
            list.iter()
                .filter_map(|t| self.resolve_type(ctx, t))
                .map(|ty| Embedded { ty })
                .collect()
        };
        let kind = match &decl.kind {
            RawTypeKind::Interface { methods, embeds: e } => TypeDeclKind::Interface {
                methods: methods.iter().map(method_sig).collect(),
                embeds: embeds(e),
            },
            RawTypeKind::Struct { embeds: e, .. } => TypeDeclKind::Struct { embeds: embeds(e) },
            RawTypeKind::Other => TypeDeclKind::Other,
        };
        TypeDecl {
            name: decl.name.clone(),
            kind,
            file: file.to_string(),
            line: decl.line,
        }
    }

    fn stmt(&self, ctx: Ctx<'_>, scope: &[(String, Binding)], stmt: &RawStmt) -> Stmt {
        match stmt {
            RawStmt::Call { callee } => Stmt::Call {
                callee: callee.clone(),
            },
            RawStmt::Return { results } => Stmt::Return {
                results: results
                    .iter()
                    .map(|e| ReturnValue {
                        nil_literal: *e == Expr::Nil,
                        ty: self.type_of(ctx, scope, e, 0),
                    })
                    .collect(),
            },
            RawStmt::Other => Stmt::Other,
        }
    }

    fn package(&self, path: &str) -> Option<&PackageInfo<'a>> {
        self.by_path.get(path).map(|&pos| &self.packages[pos])
    }

    /// Import path behind `alias` in the current file, unless a local or
    /// package-level name shadows it.
    fn import_alias(&self, ctx: Ctx<'_>, scope: &[(String, Binding)], alias: &str) -> Option<String> {
        if lookup(scope, alias).is_some() || ctx.pkg.vars.contains_key(alias) {
            return None;
        }
        ctx.pkg.aliases.get(ctx.file)?.get(alias).cloned()
    }

    fn lookup_type_name(&self, ctx: Ctx<'_>, name: &str) -> Option<TypeRef> {
        if ctx.pkg.types.contains_key(name) {
            return Some(TypeRef::named(ctx.pkg.raw.path.clone(), name));
        }
        if PREDECLARED.contains(&name) {
            return Some(TypeRef::builtin(name));
        }
        let dots = ctx.pkg.dot_imports.get(ctx.file)?;
        dots.iter()
            .find(|path| self.package(path).is_some_and(|p| p.types.contains_key(name)))
            .map(|path| TypeRef::named(path.clone(), name))
    }

    fn resolve_type(&self, ctx: Ctx<'_>, te: &TypeExpr) -> Option<TypeRef> {
        match te {
            TypeExpr::Name(name) => self.lookup_type_name(ctx, name),
            TypeExpr::Qualified(alias, name) => {
                let path = ctx.pkg.aliases.get(ctx.file)?.get(alias)?;
                Some(TypeRef::named(path.clone(), name.clone()))
            }
            TypeExpr::Pointer(inner) => self.resolve_type(ctx, inner).map(TypeRef::pointer_to),
            TypeExpr::Other => None,
        }
    }

    /// Context of the package declaring `name`, positioned at `file`.
    fn ctx_in<'r>(&'r self, module: &str, file: usize) -> Option<Ctx<'r>> {
        self.package(module).map(|pkg| Ctx { pkg, file })
    }

    fn binding_type(
        &self,
        ctx: Ctx<'_>,
        scope: &[(String, Binding)],
        binding: &Binding,
        depth: usize,
    ) -> Option<TypeRef> {
        match binding {
            Binding::Typed(te) => self.resolve_type(ctx, te),
            Binding::Value(e) => self.type_of(ctx, scope, e, depth + 1),
            Binding::Nth(e, n) => self.types_of(ctx, scope, e, depth + 1).into_iter().nth(*n).flatten(),
            Binding::Unknown => None,
        }
    }

    /// Static type of a single-valued expression.
    fn type_of(
        &self,
        ctx: Ctx<'_>,
        scope: &[(String, Binding)],
        expr: &Expr,
        depth: usize,
    ) -> Option<TypeRef> {
        if depth > MAX_DEPTH {
            return None;
        }
        match expr {
            Expr::Ident(name) => {
                if let Some((idx, binding)) = lookup(scope, name) {
                    return self.binding_type(ctx, &scope[..idx], binding, depth);
                }
                let (file, binding) = ctx.pkg.vars.get(name.as_str())?;
                self.binding_type(Ctx { pkg: ctx.pkg, file: *file }, &[], binding, depth)
            }
            Expr::Selector(base, field) => {
                if let Expr::Ident(alias) = base.as_ref() {
                    if let Some(path) = self.import_alias(ctx, scope, alias) {
                        let pkg = self.package(&path)?;
                        let (file, binding) = pkg.vars.get(field.as_str())?;
                        return self.binding_type(Ctx { pkg, file: *file }, &[], binding, depth);
                    }
                }
                let base = self.type_of(ctx, scope, base, depth + 1)?;
                self.field_type(&base, field, depth + 1)
            }
            Expr::Call { .. } => self.types_of(ctx, scope, expr, depth).into_iter().next().flatten(),
            Expr::Composite(te) => self.resolve_type(ctx, te),
            Expr::AddrOf(inner) => self
                .type_of(ctx, scope, inner, depth + 1)
                .map(TypeRef::pointer_to),
            Expr::Deref(inner) => self
                .type_of(ctx, scope, inner, depth + 1)
                .and_then(|t| t.pointee().cloned()),
            Expr::TypeAssert(_, te) => self.resolve_type(ctx, te),
            Expr::Literal(name) => Some(TypeRef::builtin(*name)),
            Expr::Nil | Expr::TypeOperand(_) | Expr::Unknown => None,
        }
    }

    /// Static types of a possibly multi-valued expression.
    fn types_of(
        &self,
        ctx: Ctx<'_>,
        scope: &[(String, Binding)],
        expr: &Expr,
        depth: usize,
    ) -> Vec<Option<TypeRef>> {
        if depth > MAX_DEPTH {
            return Vec::new();
        }
        match expr {
            Expr::Call { func, args } => self.call_results(ctx, scope, func, args, depth),
            Expr::TypeAssert(_, te) => vec![self.resolve_type(ctx, te), Some(TypeRef::builtin("bool"))],
            other => vec![self.type_of(ctx, scope, other, depth)],
        }
    }

    fn call_results(
        &self,
        ctx: Ctx<'_>,
        scope: &[(String, Binding)],
        func: &Expr,
        args: &[Expr],
        depth: usize,
    ) -> Vec<Option<TypeRef>> {
        match func {
            // Conversion written as `(T)(x)` or `[]T(x)`.
            Expr::TypeOperand(te) => vec![self.resolve_type(ctx, te)],
            Expr::Ident(name) => {
                if lookup(scope, name).is_some() || ctx.pkg.vars.contains_key(name.as_str()) {
                    return Vec::new();
                }
                if let Some((file, f)) = ctx.pkg.funcs.get(name.as_str()) {
                    let fctx = Ctx { pkg: ctx.pkg, file: *file };
                    return f.result_types.iter().map(|t| self.resolve_type(fctx, t)).collect();
                }
                match name.as_str() {
                    "new" => {
                        let ty = match args.first() {
                            Some(Expr::TypeOperand(te)) => self.resolve_type(ctx, te),
                            Some(Expr::Ident(n)) => self.lookup_type_name(ctx, n),
                            Some(Expr::Selector(base, n)) => match base.as_ref() {
                                Expr::Ident(alias) => self
                                    .resolve_type(ctx, &TypeExpr::Qualified(alias.clone(), n.clone())),
                                _ => None,
                            },
                            _ => None,
                        };
                        vec![ty.map(TypeRef::pointer_to)]
                    }
                    "len" | "cap" | "copy" => vec![Some(TypeRef::builtin("int"))],
                    // Conversion to a package or predeclared type.
                    _ => vec![self.lookup_type_name(ctx, name)],
                }
            }
            Expr::Selector(base, name) => {
                if let Expr::Ident(alias) = base.as_ref() {
                    if let Some(path) = self.import_alias(ctx, scope, alias) {
                        return self.qualified_call(&path, name);
                    }
                }
                let Some(recv) = self.type_of(ctx, scope, base, depth + 1) else {
                    return Vec::new();
                };
                self.method_results(&recv, name)
            }
            _ => Vec::new(),
        }
    }

    fn qualified_call(&self, path: &str, name: &str) -> Vec<Option<TypeRef>> {
        match (path, name) {
            ("errors", "New" | "Join") | ("fmt", "Errorf") => {
                return vec![Some(TypeRef::builtin("error"))];
            }
            _ => {}
        }
        let Some(pkg) = self.package(path) else {
            return Vec::new();
        };
        if let Some((file, f)) = pkg.funcs.get(name) {
            let fctx = Ctx { pkg, file: *file };
            return f.result_types.iter().map(|t| self.resolve_type(fctx, t)).collect();
        }
        if pkg.types.contains_key(name) {
            return vec![Some(TypeRef::named(path, name))];
        }
        Vec::new()
    }

    fn method_results(&self, recv: &TypeRef, name: &str) -> Vec<Option<TypeRef>> {
        let base = recv.pointee().unwrap_or(recv);
        let Some(type_name) = base.as_named() else {
            return Vec::new();
        };
        let Some(pkg) = self.package(&type_name.module) else {
            return Vec::new();
        };
        let Some((file, method)) = pkg
            .methods
            .get(type_name.name.as_str())
            .and_then(|m| m.get(name))
        else {
            return Vec::new();
        };
        let mctx = Ctx { pkg, file: *file };
        method
            .result_types
            .iter()
            .map(|t| self.resolve_type(mctx, t))
            .collect()
    }

    /// Type of `field` on a struct (or pointer to struct), looking through
    /// embedded fields.
    fn field_type(&self, base: &TypeRef, field: &str, depth: usize) -> Option<TypeRef> {
        if depth > MAX_DEPTH {
            return None;
        }
        let base = base.pointee().unwrap_or(base);
        let type_name: &TypeName = base.as_named()?;
        let pkg = self.package(&type_name.module)?;
        let (file, decl) = pkg.types.get(type_name.name.as_str())?;
        let RawTypeKind::Struct { fields, embeds } = &decl.kind else {
            return None;
        };
        let ctx = self.ctx_in(&type_name.module, *file)?;
        if let Some((_, te)) = fields.iter().find(|(n, _)| n == field) {
            return self.resolve_type(ctx, te);
        }
        embeds
            .iter()
            .filter_map(|te| self.resolve_type(ctx, te))
            .find_map(|embedded| self.field_type(&embedded, field, depth + 1))
    }
}

fn method_sig(sig: &RawMethodSig) -> MethodSig {
    MethodSig::new(sig.name.clone(), sig.params, sig.results)
}

/// Package name assumed for an import path whose package is not loaded.
fn default_alias(path: &str) -> String {
    let mut segments = path.rsplit('/');
    let last = segments.next().unwrap_or(path);
    // `example.com/lib/v2` is imported as `lib`.
    let last = match segments.next() {
        Some(prev) if last.len() > 1 && last.starts_with('v') && last[1..].chars().all(|c| c.is_ascii_digit()) => prev,
        _ => last,
    };
    last.trim_start_matches("go-").replace(['-', '.'], "_")
}
