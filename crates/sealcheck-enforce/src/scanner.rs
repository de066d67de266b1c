//! Declaration scanner: finds sealed contracts among a module's declarations.

use sealcheck_core::oracle::TypeOracle;
use sealcheck_core::types::{MethodSig, ModuleIndex};

use crate::types::Contract;

/// An unexported method with no parameters and no results.
pub fn is_discriminator(sig: &MethodSig) -> bool {
    !sig.is_exported() && sig.params == 0 && sig.results == 0
}

/// Every interface declared in `module` whose full method set contains a
/// discriminator. The first qualifying method by name is chosen.
pub fn scan_contracts(module: &ModuleIndex, oracle: &dyn TypeOracle) -> Vec<Contract> {
    module
        .types
        .iter()
        .filter(|decl| decl.is_interface())
        .filter_map(|decl| {
            let name = module.type_name(&decl.name);
            let discriminator = oracle
                .interface_methods(&name)
                .into_iter()
                .find(is_discriminator)?;
            Some(Contract {
                name,
                module_name: module.name.clone(),
                discriminator: discriminator.name,
                file: decl.file.clone(),
                line: decl.line,
            })
        })
        .collect()
}
