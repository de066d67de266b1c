use crate::types::{MethodSig, TypeName, TypeRef};

/// Host-facing type relation contract consumed by the analysis engine.
///
/// The engine never inspects method declarations directly; every structural
/// question goes through this trait so that a different host frontend can
/// supply its own type system. Implementors must be `Send + Sync` so they can
/// be shared across rayon workers.
pub trait TypeOracle: Send + Sync {
    /// Whether `name` is a declared interface type.
    fn is_interface(&self, name: &TypeName) -> bool;

    /// Full method set of an interface (declared plus embedded), ordered by
    /// method name. Empty for unknown or non-interface types.
    fn interface_methods(&self, name: &TypeName) -> Vec<MethodSig>;

    /// Whether `ty` has a method named `method` taking no parameters and
    /// returning no results. An unexported `method` only matches a method
    /// declared in `module`.
    fn structurally_implements(&self, ty: &TypeRef, method: &str, module: &str) -> bool;

    /// The built-in error capability: `ty` is `error` or has `Error()` with
    /// no parameters and a single result.
    fn implements_error(&self, ty: &TypeRef) -> bool;
}
