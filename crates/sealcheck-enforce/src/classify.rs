//! Default-arm classifier.
//!
//! A `default:` arm either handles the remaining variants on purpose
//! (intentional) or only guards against values that should never occur
//! (safety guard). Only a safety guard keeps the exhaustiveness check on.

use sealcheck_core::config::{DefaultArmPolicy, SealcheckConfig};
use sealcheck_core::oracle::TypeOracle;
use sealcheck_core::types::{DefaultArm, ReturnValue, Stmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultVerdict {
    /// The arm handles everything else; the site is not checked.
    Intentional,
    /// The arm aborts or reports an error; the site is still checked.
    SafetyGuard,
}

pub struct DefaultArmClassifier<'o> {
    policy: DefaultArmPolicy,
    abort_functions: Vec<String>,
    oracle: &'o dyn TypeOracle,
}

impl<'o> DefaultArmClassifier<'o> {
    pub fn new(oracle: &'o dyn TypeOracle) -> Self {
        Self::with_config(oracle, &SealcheckConfig::default())
    }

    pub fn with_config(oracle: &'o dyn TypeOracle, config: &SealcheckConfig) -> Self {
        Self {
            policy: config.default_arm,
            abort_functions: config.abort_functions.clone(),
            oracle,
        }
    }

    pub fn classify(&self, arm: &DefaultArm) -> DefaultVerdict {
        let guarded = match self.policy {
            DefaultArmPolicy::LastStatement => arm.body.last().is_some_and(|s| self.is_guard(s)),
            DefaultArmPolicy::SoleStatement => match arm.body.as_slice() {
                [only] => self.is_guard(only),
                _ => false,
            },
        };
        if guarded {
            DefaultVerdict::SafetyGuard
        } else {
            DefaultVerdict::Intentional
        }
    }

    fn is_guard(&self, stmt: &Stmt) -> bool {
        match stmt {
            Stmt::Call { callee } => self.abort_functions.iter().any(|f| f == callee),
            Stmt::Return { results } => results.iter().any(|r| self.is_error_value(r)),
            Stmt::Other => false,
        }
    }

    /// A non-nil result whose type is an error, directly or through its
    /// pointer form.
    fn is_error_value(&self, value: &ReturnValue) -> bool {
        if value.nil_literal {
            return false;
        }
        let Some(ty) = &value.ty else {
            return false;
        };
        self.oracle.implements_error(ty) || self.oracle.implements_error(&ty.clone().pointer_to())
    }
}
