//! Tree-sitter-go walk that fills a [`RawFile`].
//!
//! Declarations are read from the top level only. Function bodies (including
//! nested function literals) are walked with a lexical scope so that every
//! type switch carries the bindings visible at its position.

use tree_sitter::{Node, Tree};

use super::syntax::{
    Binding, Expr, RawDefault, RawFile, RawFunc, RawImport, RawMethod, RawMethodSig, RawSite,
    RawStmt, RawTypeDecl, RawTypeKind, Scope, TypeExpr,
};

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

fn all_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children(&mut cursor).collect()
}

/// Named nodes under `field`; separators of comma lists are skipped.
fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|n| n.is_named())
        .collect()
}

/// Statements of a block or case clause, looking through `statement_list`.
fn statements<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for child in named_children(node) {
        match child.kind() {
            "statement_list" => out.extend(
                named_children(child)
                    .into_iter()
                    .filter(|c| c.kind() != "comment"),
            ),
            "comment" => {}
            _ => out.push(child),
        }
    }
    out
}

/// Extract declarations and type switches from a parsed Go file.
pub fn extract_file(path: &str, tree: &Tree, source: &str) -> RawFile {
    let mut extractor = Extractor {
        source: source.as_bytes(),
        file: RawFile {
            path: path.to_string(),
            ..RawFile::default()
        },
    };
    extractor.visit_source_file(tree.root_node());
    extractor.file
}

struct Extractor<'s> {
    source: &'s [u8],
    file: RawFile,
}

impl<'s> Extractor<'s> {
    fn text(&self, node: Node<'_>) -> &'s str {
        node.utf8_text(self.source).unwrap_or("")
    }

    fn visit_source_file(&mut self, root: Node<'_>) {
        for node in named_children(root) {
            match node.kind() {
                "package_clause" => {
                    if let Some(name) = named_children(node).into_iter().next() {
                        self.file.package = self.text(name).to_string();
                    }
                }
                "import_declaration" => self.visit_imports(node),
                "type_declaration" => {
                    for spec in named_children(node) {
                        if spec.kind() == "type_spec" {
                            self.visit_type_spec(spec);
                        }
                    }
                }
                "function_declaration" => self.visit_function(node),
                "method_declaration" => self.visit_method(node),
                "var_declaration" => {
                    let mut scope = Scope::new();
                    for spec in var_specs(node) {
                        for value in field_children(spec, "value") {
                            self.walk_node(value, &scope);
                        }
                        self.declare_var_spec(spec, &mut scope);
                    }
                    self.file.vars.extend(scope);
                }
                _ => {}
            }
        }
    }

    fn visit_imports(&mut self, node: Node<'_>) {
        for child in named_children(node) {
            match child.kind() {
                "import_spec" => self.visit_import_spec(child),
                "import_spec_list" => {
                    for spec in named_children(child) {
                        if spec.kind() == "import_spec" {
                            self.visit_import_spec(spec);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_import_spec(&mut self, spec: Node<'_>) {
        let Some(path) = spec.child_by_field_name("path") else {
            return;
        };
        let path = self.text(path).trim_matches('"').trim_matches('`').to_string();
        let alias = spec.child_by_field_name("name").map(|n| match n.kind() {
            "dot" => ".".to_string(),
            "blank_identifier" => "_".to_string(),
            _ => self.text(n).to_string(),
        });
        self.file.imports.push(RawImport { alias, path });
    }

    fn visit_type_spec(&mut self, spec: Node<'_>) {
        let (Some(name), Some(ty)) = (
            spec.child_by_field_name("name"),
            spec.child_by_field_name("type"),
        ) else {
            return;
        };
        let kind = match ty.kind() {
            "interface_type" => self.interface_kind(ty),
            "struct_type" => self.struct_kind(ty),
            _ => RawTypeKind::Other,
        };
        self.file.types.push(RawTypeDecl {
            name: self.text(name).to_string(),
            kind,
            line: spec.start_position().row as u32 + 1,
        });
    }

    fn interface_kind(&self, node: Node<'_>) -> RawTypeKind {
        let mut methods = Vec::new();
        let mut embeds = Vec::new();
        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    if let Some(name) = elem.child_by_field_name("name") {
                        methods.push(RawMethodSig {
                            name: self.text(name).to_string(),
                            params: count_params(elem.child_by_field_name("parameters")),
                            results: count_results(elem.child_by_field_name("result")),
                        });
                    }
                }
                "type_elem" | "constraint_elem" => {
                    for ty in named_children(elem) {
                        embeds.push(self.type_expr(ty));
                    }
                }
                "type_identifier" | "qualified_type" => embeds.push(self.type_expr(elem)),
                _ => {}
            }
        }
        RawTypeKind::Interface { methods, embeds }
    }

    fn struct_kind(&self, node: Node<'_>) -> RawTypeKind {
        let mut fields = Vec::new();
        let mut embeds = Vec::new();
        let lists = named_children(node)
            .into_iter()
            .filter(|c| c.kind() == "field_declaration_list");
        for list in lists {
            for decl in named_children(list) {
                if decl.kind() != "field_declaration" {
                    continue;
                }
                let Some(ty) = decl.child_by_field_name("type") else {
                    continue;
                };
                let names = field_children(decl, "name");
                if names.is_empty() {
                    // Embedded field; the `*` of `*Base` is an anonymous token.
                    let te = self.type_expr(ty);
                    let pointer = all_children(decl).iter().any(|c| c.kind() == "*");
                    embeds.push(if pointer {
                        TypeExpr::Pointer(Box::new(te))
                    } else {
                        te
                    });
                } else {
                    let te = self.type_expr(ty);
                    for name in names {
                        fields.push((self.text(name).to_string(), te.clone()));
                    }
                }
            }
        }
        RawTypeKind::Struct { fields, embeds }
    }

    fn visit_function(&mut self, node: Node<'_>) {
        let Some(name) = node.child_by_field_name("name") else {
            return;
        };
        self.file.funcs.push(RawFunc {
            name: self.text(name).to_string(),
            result_types: self.result_types(node.child_by_field_name("result")),
        });
        let mut scope = Scope::new();
        self.declare_signature(node, &mut scope);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_block(body, &scope);
        }
    }

    fn visit_method(&mut self, node: Node<'_>) {
        let (Some(receiver), Some(name)) = (
            node.child_by_field_name("receiver"),
            node.child_by_field_name("name"),
        ) else {
            return;
        };
        if let Some((base, pointer)) = self.receiver_base(receiver) {
            self.file.methods.push(RawMethod {
                receiver: base,
                pointer_receiver: pointer,
                sig: RawMethodSig {
                    name: self.text(name).to_string(),
                    params: count_params(node.child_by_field_name("parameters")),
                    results: count_results(node.child_by_field_name("result")),
                },
                result_types: self.result_types(node.child_by_field_name("result")),
            });
        }
        let mut scope = Scope::new();
        self.declare_params(receiver, &mut scope);
        self.declare_signature(node, &mut scope);
        if let Some(body) = node.child_by_field_name("body") {
            self.walk_block(body, &scope);
        }
    }

    /// Receiver base type name and whether the receiver is a pointer.
    fn receiver_base(&self, receiver: Node<'_>) -> Option<(String, bool)> {
        let decl = named_children(receiver)
            .into_iter()
            .find(|c| c.kind() == "parameter_declaration")?;
        match self.type_expr(decl.child_by_field_name("type")?) {
            TypeExpr::Name(n) => Some((n, false)),
            TypeExpr::Pointer(inner) => match *inner {
                TypeExpr::Name(n) => Some((n, true)),
                _ => None,
            },
            _ => None,
        }
    }

    fn result_types(&self, result: Option<Node<'_>>) -> Vec<TypeExpr> {
        let Some(result) = result else {
            return Vec::new();
        };
        if result.kind() != "parameter_list" {
            return vec![self.type_expr(result)];
        }
        let mut out = Vec::new();
        for decl in named_children(result) {
            let Some(ty) = decl.child_by_field_name("type") else {
                continue;
            };
            let te = self.type_expr(ty);
            let count = field_children(decl, "name").len().max(1);
            out.extend(std::iter::repeat(te).take(count));
        }
        out
    }

    /// Bind parameters and named results of a function, method or literal.
    fn declare_signature(&self, node: Node<'_>, scope: &mut Scope) {
        if let Some(params) = node.child_by_field_name("parameters") {
            self.declare_params(params, scope);
        }
        if let Some(result) = node.child_by_field_name("result") {
            if result.kind() == "parameter_list" {
                self.declare_params(result, scope);
            }
        }
    }

    fn declare_params(&self, list: Node<'_>, scope: &mut Scope) {
        for decl in named_children(list) {
            let binding = match (decl.kind(), decl.child_by_field_name("type")) {
                ("parameter_declaration", Some(ty)) => Binding::Typed(self.type_expr(ty)),
                ("variadic_parameter_declaration", _) => Binding::Typed(TypeExpr::Other),
                _ => continue,
            };
            for name in field_children(decl, "name") {
                scope.push((self.text(name).to_string(), binding.clone()));
            }
        }
    }

    fn walk_block(&mut self, node: Node<'_>, scope: &Scope) {
        let mut scope = scope.clone();
        for stmt in statements(node) {
            self.walk_node(stmt, &scope);
            self.declare(stmt, &mut scope);
        }
    }

    fn walk_node(&mut self, node: Node<'_>, scope: &Scope) {
        match node.kind() {
            "type_switch_statement" => self.visit_type_switch(node, scope),
            "func_literal" => {
                let mut inner = scope.clone();
                self.declare_signature(node, &mut inner);
                if let Some(body) = node.child_by_field_name("body") {
                    self.walk_block(body, &inner);
                }
            }
            "block" | "expression_case" | "default_case" | "communication_case" | "type_case" => {
                self.walk_block(node, scope)
            }
            "if_statement" | "for_statement" | "expression_switch_statement" => {
                let mut inner = scope.clone();
                let init = node.child_by_field_name("initializer");
                if let Some(init) = init {
                    self.walk_node(init, &inner);
                    self.declare(init, &mut inner);
                }
                for child in named_children(node) {
                    if Some(child) == init {
                        continue;
                    }
                    match child.kind() {
                        "range_clause" => {
                            if let Some(right) = child.child_by_field_name("right") {
                                self.walk_node(right, &inner);
                            }
                            let defines = all_children(child).iter().any(|c| c.kind() == ":=");
                            if let (true, Some(left)) = (defines, child.child_by_field_name("left")) {
                                for name in named_children(left) {
                                    inner.push((self.text(name).to_string(), Binding::Unknown));
                                }
                            }
                        }
                        "for_clause" => {
                            if let Some(init) = child.child_by_field_name("initializer") {
                                self.declare(init, &mut inner);
                            }
                            self.walk_node(child, &inner);
                        }
                        _ => self.walk_node(child, &inner),
                    }
                }
            }
            _ => {
                for child in named_children(node) {
                    self.walk_node(child, scope);
                }
            }
        }
    }

    /// Record the bindings a statement introduces.
    fn declare(&self, stmt: Node<'_>, scope: &mut Scope) {
        match stmt.kind() {
            "short_var_declaration" => {
                let lefts = stmt
                    .child_by_field_name("left")
                    .map(named_children)
                    .unwrap_or_default();
                let rights = stmt
                    .child_by_field_name("right")
                    .map(named_children)
                    .unwrap_or_default();
                self.bind_values(&lefts, &rights, scope);
            }
            "var_declaration" => {
                for spec in var_specs(stmt) {
                    self.declare_var_spec(spec, scope);
                }
            }
            _ => {}
        }
    }

    fn declare_var_spec(&self, spec: Node<'_>, scope: &mut Scope) {
        let names = field_children(spec, "name");
        if let Some(ty) = spec.child_by_field_name("type") {
            let te = self.type_expr(ty);
            for name in names {
                scope.push((self.text(name).to_string(), Binding::Typed(te.clone())));
            }
            return;
        }
        let values = spec
            .child_by_field_name("value")
            .map(named_children)
            .unwrap_or_default();
        self.bind_values(&names, &values, scope);
    }

    fn bind_values(&self, names: &[Node<'_>], values: &[Node<'_>], scope: &mut Scope) {
        let names: Vec<&str> = names.iter().map(|n| self.text(*n)).collect();
        if names.len() == values.len() {
            for (name, value) in names.iter().zip(values) {
                if *name != "_" {
                    scope.push((name.to_string(), Binding::Value(self.expr(*value))));
                }
            }
        } else if values.len() == 1 {
            let value = self.expr(values[0]);
            for (i, name) in names.iter().enumerate() {
                if *name != "_" {
                    scope.push((name.to_string(), Binding::Nth(value.clone(), i)));
                }
            }
        } else {
            for name in names {
                scope.push((name.to_string(), Binding::Unknown));
            }
        }
    }

    fn visit_type_switch(&mut self, node: Node<'_>, scope: &Scope) {
        let mut inner = scope.clone();
        if let Some(init) = node.child_by_field_name("initializer") {
            self.walk_node(init, &inner);
            self.declare(init, &mut inner);
        }
        let Some(value) = node.child_by_field_name("value") else {
            return;
        };
        self.walk_node(value, &inner);
        let scrutinee = self.expr(value);
        let alias = node
            .child_by_field_name("alias")
            .and_then(|list| named_children(list).into_iter().next())
            .map(|n| self.text(n).to_string());

        let mut arms = Vec::new();
        let mut default = None;
        for clause in named_children(node) {
            match clause.kind() {
                "type_case" => {
                    let types: Vec<TypeExpr> = field_children(clause, "type")
                        .into_iter()
                        .filter(|t| self.text(*t) != "nil")
                        .map(|t| self.type_expr(t))
                        .collect();
                    let mut case_scope = inner.clone();
                    if let Some(alias) = &alias {
                        let binding = match types.as_slice() {
                            [single] => Binding::Typed(single.clone()),
                            _ => Binding::Value(scrutinee.clone()),
                        };
                        case_scope.push((alias.clone(), binding));
                    }
                    self.walk_block(clause, &case_scope);
                    arms.push(types);
                }
                "default_case" => {
                    let mut case_scope = inner.clone();
                    if let Some(alias) = &alias {
                        case_scope.push((alias.clone(), Binding::Value(scrutinee.clone())));
                    }
                    default = Some(self.default_arm(clause, case_scope));
                }
                _ => {}
            }
        }

        let pos = node.start_position();
        self.file.sites.push(RawSite {
            line: pos.row as u32 + 1,
            column: pos.column as u32 + 1,
            scope: inner,
            scrutinee,
            arms,
            default,
        });
    }

    fn default_arm(&mut self, clause: Node<'_>, mut scope: Scope) -> RawDefault {
        let mut body = Vec::new();
        for stmt in statements(clause) {
            self.walk_node(stmt, &scope);
            body.push(self.raw_stmt(stmt));
            self.declare(stmt, &mut scope);
        }
        RawDefault { body, scope }
    }

    fn raw_stmt(&self, stmt: Node<'_>) -> RawStmt {
        match stmt.kind() {
            "expression_statement" => {
                let call = named_children(stmt)
                    .into_iter()
                    .next()
                    .filter(|e| e.kind() == "call_expression");
                match call.and_then(|c| c.child_by_field_name("function")) {
                    Some(func) => RawStmt::Call {
                        callee: self.text(func).to_string(),
                    },
                    None => RawStmt::Other,
                }
            }
            "return_statement" => {
                let mut results = Vec::new();
                for child in named_children(stmt) {
                    if child.kind() == "expression_list" {
                        results.extend(named_children(child).into_iter().map(|e| self.expr(e)));
                    } else if child.kind() != "comment" {
                        results.push(self.expr(child));
                    }
                }
                RawStmt::Return { results }
            }
            _ => RawStmt::Other,
        }
    }

    fn type_expr(&self, node: Node<'_>) -> TypeExpr {
        match node.kind() {
            "type_identifier" | "identifier" => TypeExpr::Name(self.text(node).to_string()),
            "qualified_type" => match (
                node.child_by_field_name("package"),
                node.child_by_field_name("name"),
            ) {
                (Some(pkg), Some(name)) => {
                    TypeExpr::Qualified(self.text(pkg).to_string(), self.text(name).to_string())
                }
                _ => TypeExpr::Other,
            },
            "pointer_type" | "parenthesized_type" => match named_children(node).into_iter().next() {
                Some(inner) if node.kind() == "pointer_type" => {
                    TypeExpr::Pointer(Box::new(self.type_expr(inner)))
                }
                Some(inner) => self.type_expr(inner),
                None => TypeExpr::Other,
            },
            "generic_type" => node
                .child_by_field_name("type")
                .map(|t| self.type_expr(t))
                .unwrap_or(TypeExpr::Other),
            _ => TypeExpr::Other,
        }
    }

    fn expr(&self, node: Node<'_>) -> Expr {
        match node.kind() {
            "identifier" => Expr::Ident(self.text(node).to_string()),
            "nil" => Expr::Nil,
            "true" | "false" => Expr::Literal("bool"),
            "int_literal" => Expr::Literal("int"),
            "float_literal" => Expr::Literal("float64"),
            "imaginary_literal" => Expr::Literal("complex128"),
            "rune_literal" => Expr::Literal("rune"),
            "interpreted_string_literal" | "raw_string_literal" => Expr::Literal("string"),
            "parenthesized_expression" => named_children(node)
                .into_iter()
                .next()
                .map(|e| self.expr(e))
                .unwrap_or(Expr::Unknown),
            "selector_expression" => match (
                node.child_by_field_name("operand"),
                node.child_by_field_name("field"),
            ) {
                (Some(operand), Some(field)) => {
                    Expr::Selector(Box::new(self.expr(operand)), self.text(field).to_string())
                }
                _ => Expr::Unknown,
            },
            "call_expression" => {
                let Some(func) = node.child_by_field_name("function") else {
                    return Expr::Unknown;
                };
                let args = node
                    .child_by_field_name("arguments")
                    .map(|list| {
                        named_children(list)
                            .into_iter()
                            .filter(|a| a.kind() != "comment")
                            .map(|a| self.expr(a))
                            .collect()
                    })
                    .unwrap_or_default();
                Expr::Call {
                    func: Box::new(self.expr(func)),
                    args,
                }
            }
            "type_conversion_expression" => match node.child_by_field_name("type") {
                Some(ty) => Expr::Call {
                    func: Box::new(Expr::TypeOperand(self.type_expr(ty))),
                    args: Vec::new(),
                },
                None => Expr::Unknown,
            },
            "composite_literal" => node
                .child_by_field_name("type")
                .map(|t| Expr::Composite(self.type_expr(t)))
                .unwrap_or(Expr::Unknown),
            "unary_expression" => {
                let operator = node.child_by_field_name("operator").map(|o| o.kind());
                let Some(operand) = node.child_by_field_name("operand") else {
                    return Expr::Unknown;
                };
                match operator {
                    Some("&") => Expr::AddrOf(Box::new(self.expr(operand))),
                    Some("*") => Expr::Deref(Box::new(self.expr(operand))),
                    Some("-") | Some("+") | Some("^") => self.expr(operand),
                    Some("!") => Expr::Literal("bool"),
                    _ => Expr::Unknown,
                }
            }
            "type_assertion_expression" => match (
                node.child_by_field_name("operand"),
                node.child_by_field_name("type"),
            ) {
                (Some(operand), Some(ty)) => {
                    Expr::TypeAssert(Box::new(self.expr(operand)), self.type_expr(ty))
                }
                _ => Expr::Unknown,
            },
            "type_identifier" | "qualified_type" | "pointer_type" | "generic_type"
            | "slice_type" | "array_type" | "map_type" | "channel_type" | "function_type"
            | "struct_type" | "interface_type" => Expr::TypeOperand(self.type_expr(node)),
            _ => Expr::Unknown,
        }
    }
}

fn var_specs<'t>(decl: Node<'t>) -> Vec<Node<'t>> {
    let mut out = Vec::new();
    for child in named_children(decl) {
        match child.kind() {
            "var_spec" => out.push(child),
            "var_spec_list" => out.extend(
                named_children(child)
                    .into_iter()
                    .filter(|c| c.kind() == "var_spec"),
            ),
            _ => {}
        }
    }
    out
}

/// Number of parameters declared in a `parameter_list`.
fn count_params(list: Option<Node<'_>>) -> u32 {
    let Some(list) = list else {
        return 0;
    };
    named_children(list)
        .into_iter()
        .filter(|d| {
            matches!(
                d.kind(),
                "parameter_declaration" | "variadic_parameter_declaration"
            )
        })
        .map(|d| field_children(d, "name").len().max(1) as u32)
        .sum()
}

fn count_results(result: Option<Node<'_>>) -> u32 {
    match result {
        None => 0,
        Some(r) if r.kind() == "parameter_list" => count_params(Some(r)),
        Some(_) => 1,
    }
}
