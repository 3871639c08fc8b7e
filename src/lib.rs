// quva - declarative field validation
//
// Re-exports the validation engine and, behind the `log` feature, the
// environment-driven logging setup.

pub use quva_validation::*;

#[cfg(feature = "log")]
pub use quva_log;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Custom, FieldRules, FieldValue, IsEmail, MaxLength, Membership, MinLength, NumericRange,
        Record, Required, Rule, RuleSet, ValidationReport, run_validation,
    };
}
