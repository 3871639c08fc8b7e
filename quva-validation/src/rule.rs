// Rule trait

use crate::FieldValue;

/// A single, immutable validation rule.
///
/// Rules are built once and may be shared between any number of rule sets
/// and threads. `evaluate` must not mutate the rule.
pub trait Rule: Send + Sync {
    /// Constraint name, used in log events
    fn name(&self) -> &str;

    /// Whether the rule body is skipped for empty values
    fn ignore_when_empty(&self) -> bool;

    /// Whether the rule body should execute for `value`
    fn should_run(&self, value: FieldValue<'_>) -> bool {
        should_run(self.ignore_when_empty(), value)
    }

    /// Evaluate a value, returning an error message on failure
    fn evaluate(&self, value: FieldValue<'_>) -> Option<String>;

    /// Evaluate anything convertible into a [`FieldValue`]
    fn check<'a>(&self, value: impl Into<FieldValue<'a>>) -> Option<String>
    where
        Self: Sized,
    {
        self.evaluate(value.into())
    }
}

/// The shared empty-value policy.
///
/// Returns `true` unless `ignore_when_empty` is set and the value is absent,
/// null or an empty string.
pub fn should_run(ignore_when_empty: bool, value: FieldValue<'_>) -> bool {
    !ignore_when_empty || !value.is_empty()
}

/// Pick the custom message when one was configured.
pub(crate) fn message_or(custom: Option<&str>, default: impl FnOnce() -> String) -> String {
    match custom {
        Some(message) => message.to_string(),
        None => default(),
    }
}
