//! Method-set universe over every loaded module.
//!
//! Follows Go's method set rules: a value `T` carries value-receiver methods,
//! `*T` carries all of them, and embedded fields promote their own sets.
//! Interfaces contribute declared plus embedded methods. Promotion honours
//! embedding depth: shallower methods hide deeper ones and a name reached
//! twice at the same depth is ambiguous. Traversal is cycle-safe, so
//! malformed recursive embeddings terminate.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::oracle::TypeOracle;
use crate::types::{is_exported, MethodSig, ModuleIndex, TypeDecl, TypeDeclKind, TypeName, TypeRef};

/// A method reachable from some type, tagged with its declaring module.
#[derive(Debug, Clone)]
struct MethodEntry {
    sig: MethodSig,
    module: String,
}

/// Type declarations and receiver methods of every module in one run.
#[derive(Debug, Default)]
pub struct TypeUniverse {
    types: HashMap<TypeName, TypeDecl>,
    /// Receiver type -> (method, declared on pointer receiver).
    methods: HashMap<TypeName, Vec<(MethodSig, bool)>>,
}

impl TypeUniverse {
    pub fn build(modules: &[ModuleIndex]) -> Self {
        let mut universe = Self::default();
        for module in modules {
            for decl in &module.types {
                universe
                    .types
                    .insert(module.type_name(&decl.name), decl.clone());
            }
            for method in &module.methods {
                universe
                    .methods
                    .entry(module.type_name(&method.receiver))
                    .or_default()
                    .push((method.sig.clone(), method.pointer_receiver));
            }
        }
        universe
    }

    pub fn contains(&self, name: &TypeName) -> bool {
        self.types.contains_key(name)
    }

    /// Number of known type declarations.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn method_set(&self, ty: &TypeRef) -> Vec<MethodEntry> {
        match ty {
            TypeRef::Builtin(b) if b == "error" => vec![error_method()],
            TypeRef::Builtin(_) => Vec::new(),
            TypeRef::Named(name) if self.is_interface(name) => self.interface_entries(name),
            TypeRef::Named(name) => self.promoted_methods(name, false),
            // Pointers to interfaces have an empty method set.
            TypeRef::Pointer(inner) => match inner.as_ref() {
                TypeRef::Named(name) if !self.is_interface(name) => {
                    self.promoted_methods(name, true)
                }
                _ => Vec::new(),
            },
        }
    }

    /// Declared plus embedded interface methods, one entry per name.
    fn interface_entries(&self, name: &TypeName) -> Vec<MethodEntry> {
        let mut out = Vec::new();
        let mut seen = HashSet::new();
        self.collect_interface(name, &mut seen, &mut out);
        let mut names = HashSet::new();
        out.retain(|e| names.insert(e.sig.name.clone()));
        out
    }

    fn collect_interface(
        &self,
        name: &TypeName,
        seen: &mut HashSet<TypeName>,
        out: &mut Vec<MethodEntry>,
    ) {
        if !seen.insert(name.clone()) {
            return;
        }
        let Some(TypeDeclKind::Interface { methods, embeds }) =
            self.types.get(name).map(|d| &d.kind)
        else {
            return;
        };
        out.extend(methods.iter().map(|sig| MethodEntry {
            sig: sig.clone(),
            module: name.module.clone(),
        }));
        for embedded in embeds {
            match &embedded.ty {
                TypeRef::Named(inner) => self.collect_interface(inner, seen, out),
                TypeRef::Builtin(b) if b == "error" => out.push(error_method()),
                _ => {}
            }
        }
    }

    /// Method set of a concrete named type, including promoted methods.
    ///
    /// Embedded fields are visited breadth first, one depth at a time. A name
    /// found at a shallower depth hides deeper ones; a name found more than
    /// once at its shallowest depth is ambiguous and not in the set. A type
    /// reached twice at the same depth collides with itself.
    fn promoted_methods(&self, root: &TypeName, pointer: bool) -> Vec<MethodEntry> {
        let mut out = Vec::new();
        let mut decided: HashSet<String> = HashSet::new();
        let mut seen: HashSet<TypeName> = HashSet::new();
        let mut level = vec![Embedding::Concrete {
            name: root.clone(),
            pointer,
        }];

        while !level.is_empty() {
            let mut multiplicity: HashMap<&TypeName, usize> = HashMap::new();
            for node in &level {
                if let Some(name) = node.type_name() {
                    *multiplicity.entry(name).or_default() += 1;
                }
            }

            let mut candidates: BTreeMap<String, Vec<MethodEntry>> = BTreeMap::new();
            let mut visited: HashSet<TypeName> = HashSet::new();
            let mut next = Vec::new();
            for node in &level {
                let copies = match node.type_name() {
                    Some(name) => {
                        if seen.contains(name) || !visited.insert(name.clone()) {
                            continue;
                        }
                        multiplicity.get(name).copied().unwrap_or(1)
                    }
                    None => 1,
                };
                let entries = match node {
                    Embedding::Concrete { name, pointer } => {
                        self.embedded_fields(name, *pointer, &mut next);
                        self.own_methods(name, *pointer)
                    }
                    Embedding::Interface(name) => self.interface_entries(name),
                    Embedding::Error => vec![error_method()],
                };
                for entry in entries {
                    if decided.contains(&entry.sig.name) {
                        continue;
                    }
                    let slot = candidates.entry(entry.sig.name.clone()).or_default();
                    for _ in 0..copies {
                        slot.push(entry.clone());
                    }
                }
            }

            for (name, mut found) in candidates {
                decided.insert(name);
                if found.len() == 1 {
                    out.extend(found.pop());
                }
            }
            seen.extend(visited);
            level = next;
        }
        out
    }

    fn own_methods(&self, name: &TypeName, pointer: bool) -> Vec<MethodEntry> {
        let Some(methods) = self.methods.get(name) else {
            return Vec::new();
        };
        methods
            .iter()
            .filter(|(_, pointer_receiver)| pointer || !pointer_receiver)
            .map(|(sig, _)| MethodEntry {
                sig: sig.clone(),
                module: name.module.clone(),
            })
            .collect()
    }

    /// Embedded fields of a struct, one depth down. `*E` promotes every
    /// method of `E` to both forms of the outer type; a value `E` promotes
    /// its value set to `S` and its full set to `*S`.
    fn embedded_fields(&self, name: &TypeName, outer_pointer: bool, next: &mut Vec<Embedding>) {
        let Some(TypeDeclKind::Struct { embeds }) = self.types.get(name).map(|d| &d.kind) else {
            return;
        };
        for embedded in embeds {
            let node = match &embedded.ty {
                TypeRef::Pointer(inner) => match inner.as_ref() {
                    TypeRef::Named(inner) => Embedding::Concrete {
                        name: inner.clone(),
                        pointer: true,
                    },
                    _ => continue,
                },
                TypeRef::Named(inner) if self.is_interface(inner) => {
                    Embedding::Interface(inner.clone())
                }
                TypeRef::Named(inner) => Embedding::Concrete {
                    name: inner.clone(),
                    pointer: outer_pointer,
                },
                TypeRef::Builtin(b) if b == "error" => Embedding::Error,
                TypeRef::Builtin(_) => continue,
            };
            next.push(node);
        }
    }
}

/// A type reached through struct embedding.
#[derive(Debug)]
enum Embedding {
    Concrete { name: TypeName, pointer: bool },
    Interface(TypeName),
    /// The predeclared `error` interface.
    Error,
}

impl Embedding {
    fn type_name(&self) -> Option<&TypeName> {
        match self {
            Embedding::Concrete { name, .. } | Embedding::Interface(name) => Some(name),
            Embedding::Error => None,
        }
    }
}

fn error_method() -> MethodEntry {
    MethodEntry {
        sig: MethodSig::new("Error", 0, 1),
        module: String::new(),
    }
}

impl TypeOracle for TypeUniverse {
    fn is_interface(&self, name: &TypeName) -> bool {
        self.types.get(name).is_some_and(TypeDecl::is_interface)
    }

    fn interface_methods(&self, name: &TypeName) -> Vec<MethodSig> {
        if !self.is_interface(name) {
            return Vec::new();
        }
        let mut sigs: Vec<MethodSig> = self
            .interface_entries(name)
            .into_iter()
            .map(|e| e.sig)
            .collect();
        sigs.sort_by(|a, b| a.name.cmp(&b.name));
        sigs
    }

    fn structurally_implements(&self, ty: &TypeRef, method: &str, module: &str) -> bool {
        self.method_set(ty).iter().any(|m| {
            m.sig.name == method
                && m.sig.params == 0
                && m.sig.results == 0
                && (is_exported(method) || m.module == module)
        })
    }

    /// Result types are not part of the IR: any `Error()` with no parameters
    /// and one result counts, even when that result is not `string`.
    fn implements_error(&self, ty: &TypeRef) -> bool {
        self.method_set(ty)
            .iter()
            .any(|m| m.sig.name == "Error" && m.sig.params == 0 && m.sig.results == 1)
    }
}
