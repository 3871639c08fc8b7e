// Validation orchestration

use crate::{FieldValue, Record, Rule, RuleRef, RuleSet, ValidationError, ValidationReport};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Run every rule in `rule_set` against `record`.
///
/// Fields that have no rules are ignored; a field the record lacks is seen
/// as [`FieldValue::Absent`]. Messages are collected per field in rule order
/// and only fields with at least one message appear in the report.
///
/// Neither the record nor the rules are modified. A rule that panics (for
/// example a [`Custom`](crate::Custom) closure) unwinds through this call.
pub fn run_validation<R: Record + ?Sized>(record: &R, rule_set: &RuleSet) -> ValidationReport {
    let mut errors = BTreeMap::new();

    for (field, rules) in rule_set.iter() {
        let messages = evaluate_rules(field, rules, record.field(field));
        if !messages.is_empty() {
            debug!(field, errors = messages.len(), "field failed validation");
            errors.insert(field.to_string(), messages);
        }
    }

    let report = ValidationReport::from_errors(errors);
    debug!(
        fields = rule_set.len(),
        failed = report.errors().len(),
        passed = report.passed(),
        "validation finished"
    );
    report
}

/// Validate any serializable value whose JSON form is an object.
///
/// ```
/// use quva_validation::{validate_serialize, Required, RuleSet};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Signup {
///     username: String,
/// }
///
/// let rules = RuleSet::new().rule("username", Required::new());
/// let report = validate_serialize(&Signup { username: "  ".into() }, &rules).unwrap();
/// assert!(!report.passed());
/// ```
pub fn validate_serialize<T: Serialize + ?Sized>(
    value: &T,
    rule_set: &RuleSet,
) -> Result<ValidationReport, ValidationError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(run_validation(&map, rule_set)),
        other => Err(ValidationError::NotAnObject(json_kind(&other))),
    }
}

/// Evaluate rules in order, keeping every message.
pub(crate) fn evaluate_rules(
    field: &str,
    rules: &[RuleRef],
    value: FieldValue<'_>,
) -> Vec<String> {
    let mut messages = Vec::new();

    for rule in rules {
        match rule.evaluate(value) {
            Some(message) => {
                trace!(field, rule = rule.name(), %message, "rule failed");
                messages.push(message);
            }
            None => trace!(field, rule = rule.name(), "rule passed"),
        }
    }

    messages
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validators::*;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn test_run_validation_reports_failing_fields() {
        let record = json!({ "name": "", "email": "bad" });
        let rules = RuleSet::new()
            .rule("name", Required::new())
            .rule("email", IsEmail::new());

        let report = run_validation(&record, &rules);

        assert!(!report.passed());
        assert_eq!(
            report.field_errors("name"),
            Some(&["This field is required".to_string()][..])
        );
        assert_eq!(
            report.field_errors("email"),
            Some(&["must be a valid email format".to_string()][..])
        );
        assert_eq!(report.errors().len(), 2);
    }

    #[test]
    fn test_messages_follow_rule_order() {
        let mut record = HashMap::new();
        record.insert("x", "ab");
        let rules = RuleSet::new()
            .rule("x", MinLength::new(5))
            .rule("x", MaxLength::new(1));

        let report = run_validation(&record, &rules);

        assert_eq!(
            report.field_errors("x").unwrap(),
            [
                "must be at least 5 characters long",
                "can be at most 1 characters long"
            ]
        );
    }

    #[test]
    fn test_passing_fields_are_omitted() {
        let record = json!({ "name": "Ada", "email": "nope" });
        let rules = RuleSet::new()
            .rule("name", Required::new())
            .rule("email", IsEmail::new());

        let report = run_validation(&record, &rules);

        assert!(!report.has_errors("name"));
        assert!(report.has_errors("email"));
    }

    #[test]
    fn test_unvalidated_fields_are_ignored() {
        let record = json!({ "name": "Ada", "extra": "" });
        let rules = RuleSet::new().rule("name", Required::new());

        let report = run_validation(&record, &rules);
        assert!(report.passed());
        assert!(report.errors().is_empty());
    }

    #[test]
    fn test_missing_field_is_absent() {
        let record = json!({});
        let rules = RuleSet::new()
            .rule("nickname", MinLength::new(3))
            .rule("role", Membership::new(["admin", "user"]));

        let report = run_validation(&record, &rules);

        assert!(!report.has_errors("nickname"));
        assert_eq!(
            report.field_errors("role").unwrap(),
            ["must be one of admin,user"]
        );
    }

    #[test]
    fn test_empty_rule_set_passes() {
        let report = run_validation(&json!({ "a": 1 }), &RuleSet::new());
        assert!(report.passed());
    }

    #[test]
    fn test_validate_serialize_rejects_non_objects() {
        let rules = RuleSet::new().rule("a", Required::new());
        let err = validate_serialize(&vec![1, 2], &rules).unwrap_err();
        assert!(matches!(err, ValidationError::NotAnObject("array")));
    }
}
