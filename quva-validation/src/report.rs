// Validation report

use crate::ValidationError;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Outcome of a validation run.
///
/// `passed` is true exactly when no field reported an error. Fields without
/// errors never appear in `errors`, and each field's messages keep the order
/// of its rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    passed: bool,
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationReport {
    /// Build a report from collected field errors, dropping empty entries
    pub fn from_errors(mut errors: BTreeMap<String, Vec<String>>) -> Self {
        errors.retain(|_, messages| !messages.is_empty());
        Self {
            passed: errors.is_empty(),
            errors,
        }
    }

    /// A report with no errors
    pub fn passing() -> Self {
        Self::from_errors(BTreeMap::new())
    }

    /// Whether every field passed
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Error messages keyed by field
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }

    /// Error messages for one field, in rule order
    pub fn field_errors(&self, field: &str) -> Option<&[String]> {
        self.errors.get(field).map(Vec::as_slice)
    }

    /// Whether a field has at least one error
    pub fn has_errors(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Total number of messages across all fields
    pub fn error_count(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn into_errors(self) -> BTreeMap<String, Vec<String>> {
        self.errors
    }

    /// `Ok(())` when passed, otherwise the report wrapped in an error
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.passed {
            Ok(())
        } else {
            Err(ValidationError::Failed(self))
        }
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "passed": self.passed,
            "errors": self.errors,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.passed {
            return writeln!(f, "validation passed");
        }
        for (field, messages) in &self.errors {
            for message in messages {
                writeln!(f, "{}: {}", field, message)?;
            }
        }
        Ok(())
    }
}
