//! Variant set builder.

use sealcheck_core::oracle::TypeOracle;
use sealcheck_core::types::{ModuleIndex, TypeRef};

use crate::types::{Contract, VariantId, VariantSetFact};

/// Collect every concrete type of the contract's module that implements the
/// discriminator. The value form is tried first; a type only reachable
/// through its pointer form is recorded as `*Name`.
pub fn build_variant_set(
    contract: &Contract,
    module: &ModuleIndex,
    oracle: &dyn TypeOracle,
) -> VariantSetFact {
    let variants = module
        .types
        .iter()
        .filter(|decl| !decl.is_interface())
        .filter_map(|decl| {
            let value = TypeRef::Named(module.type_name(&decl.name));
            if oracle.structurally_implements(&value, &contract.discriminator, &module.path) {
                return Some(VariantId::bare(decl.name.clone()));
            }
            let pointer = value.pointer_to();
            oracle
                .structurally_implements(&pointer, &contract.discriminator, &module.path)
                .then(|| VariantId::pointer(decl.name.clone()))
        })
        .collect();
    VariantSetFact::new(contract, variants)
}
