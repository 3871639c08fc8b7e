//! Declarative field validation for quva
//!
//! Rules are small immutable values implementing [`Rule`]. A [`RuleSet`]
//! maps field names to ordered rule lists, and [`run_validation`] folds the
//! results for a record into a [`ValidationReport`].
//!
//! # Examples
//!
//! ## Validating a record
//!
//! ```
//! use quva_validation::{run_validation, IsEmail, MinLength, Required, RuleSet};
//! use std::collections::HashMap;
//!
//! let rules = RuleSet::new()
//!     .rule("name", Required::new())
//!     .rule("name", MinLength::new(3))
//!     .rule("email", IsEmail::new());
//!
//! let mut record = HashMap::new();
//! record.insert("name", "Al");
//! record.insert("email", "al@example.com");
//!
//! let report = run_validation(&record, &rules);
//! assert!(!report.passed());
//! assert_eq!(
//!     report.field_errors("name").unwrap(),
//!     ["must be at least 3 characters long"]
//! );
//! assert!(report.field_errors("email").is_none());
//! ```
//!
//! ## Field rules builder
//!
//! ```
//! use quva_validation::{FieldRules, Membership, NumericRange, RuleSet};
//! use serde_json::json;
//!
//! let rules: RuleSet = [
//!     FieldRules::for_field("age").add(NumericRange::new(18.0, 130.0)),
//!     FieldRules::for_field("plan").add(Membership::new(["free", "pro"])),
//! ]
//! .into_iter()
//! .collect();
//!
//! let report = rules.validate(&json!({ "age": "42", "plan": "pro" }));
//! assert!(report.passed());
//! ```
//!
//! ## Single rules
//!
//! ```
//! use quva_validation::{NumericRange, Rule};
//!
//! let range = NumericRange::new(1.0, 10.0);
//! assert_eq!(range.check("5"), None);
//! assert_eq!(range.check("20").as_deref(), Some("must be between 1 and 10"));
//! assert_eq!(range.check("x").as_deref(), Some("must be numeric"));
//! ```

mod errors;
mod report;
mod rule;
mod rules;
mod runner;
mod validators;
mod value;

pub use errors::*;
pub use report::*;
pub use rule::{Rule, should_run};
pub use rules::*;
pub use runner::{run_validation, validate_serialize};
pub use validators::*;
pub use value::*;
