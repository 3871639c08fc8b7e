// Built-in rules

use crate::rule::message_or;
use crate::{FieldValue, Rule};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::sync::Arc;

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

// Longest leading decimal literal, optionally signed, or `Infinity`.
static NUMBER_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)")
        .unwrap()
});

/// The value must be present and not blank.
///
/// Always runs, including on empty values.
#[derive(Debug, Clone, Default)]
pub struct Required {
    message: Option<String>,
}

impl Required {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for Required {
    fn name(&self) -> &str {
        "required"
    }

    fn ignore_when_empty(&self) -> bool {
        false
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        let present = match value {
            FieldValue::Absent | FieldValue::Null => false,
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Object(map) => !map.is_empty(),
            FieldValue::Number(_) | FieldValue::Bool(_) => true,
        };

        if present {
            None
        } else {
            Some(message_or(self.message.as_deref(), || {
                "This field is required".to_string()
            }))
        }
    }
}

/// Minimum length, in UTF-16 code units for text or elements for lists.
///
/// Values without a length (numbers, booleans, objects) fail.
#[derive(Debug, Clone)]
pub struct MinLength {
    min_len: usize,
    message: Option<String>,
}

impl MinLength {
    pub fn new(min_len: usize) -> Self {
        Self {
            min_len,
            message: None,
        }
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn min_len(&self) -> usize {
        self.min_len
    }
}

impl Rule for MinLength {
    fn name(&self) -> &str {
        "minLength"
    }

    fn ignore_when_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if !self.should_run(value) {
            return None;
        }

        match value.length() {
            Some(len) if len >= self.min_len => None,
            _ => Some(message_or(self.message.as_deref(), || {
                format!("must be at least {} characters long", self.min_len)
            })),
        }
    }
}

/// Maximum length, in UTF-16 code units for text or elements for lists.
///
/// Values without a length (numbers, booleans, objects) fail.
#[derive(Debug, Clone)]
pub struct MaxLength {
    max_len: usize,
    message: Option<String>,
}

impl MaxLength {
    pub fn new(max_len: usize) -> Self {
        Self {
            max_len,
            message: None,
        }
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }
}

impl Rule for MaxLength {
    fn name(&self) -> &str {
        "maxLength"
    }

    fn ignore_when_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if !self.should_run(value) {
            return None;
        }

        match value.length() {
            Some(len) if len <= self.max_len => None,
            _ => Some(message_or(self.message.as_deref(), || {
                format!("can be at most {} characters long", self.max_len)
            })),
        }
    }
}

/// Loose email shape check: `local@domain.tld`, no whitespace, single `@`.
#[derive(Debug, Clone, Default)]
pub struct IsEmail {
    message: Option<String>,
}

impl IsEmail {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl Rule for IsEmail {
    fn name(&self) -> &str {
        "isEmail"
    }

    fn ignore_when_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if !self.should_run(value) {
            return None;
        }

        match value.as_text() {
            Some(text) if EMAIL_REGEX.is_match(text) => None,
            _ => Some(message_or(self.message.as_deref(), || {
                "must be a valid email format".to_string()
            })),
        }
    }
}

/// Inclusive numeric range.
///
/// Text is read like `parseFloat`: leading whitespace is skipped and the
/// longest numeric prefix is used, so `"12px"` is 12 and `"px12"` is not
/// numeric. `NaN` counts as non-numeric. Bounds are not checked: with
/// `min > max` every number is out of range. A custom
/// message replaces both the "not numeric" and the "out of range" message.
#[derive(Debug, Clone)]
pub struct NumericRange {
    min: f64,
    max: f64,
    message: Option<String>,
}

impl NumericRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            message: None,
        }
    }

    /// Override both default messages
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    fn parse(value: FieldValue<'_>) -> Option<f64> {
        let number = match value {
            FieldValue::Number(n) => n,
            FieldValue::Text(text) => {
                let prefix = NUMBER_PREFIX_REGEX.find(text.trim_start())?;
                prefix.as_str().parse::<f64>().ok()?
            }
            _ => return None,
        };

        if number.is_nan() { None } else { Some(number) }
    }
}

impl Rule for NumericRange {
    fn name(&self) -> &str {
        "numericRange"
    }

    fn ignore_when_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if !self.should_run(value) {
            return None;
        }

        match Self::parse(value) {
            None => Some(message_or(self.message.as_deref(), || {
                "must be numeric".to_string()
            })),
            Some(n) if n < self.min || n > self.max => {
                Some(message_or(self.message.as_deref(), || {
                    format!("must be between {} and {}", self.min, self.max)
                }))
            }
            Some(_) => None,
        }
    }
}

/// The value must be one of a fixed list of strings.
///
/// Unlike the other optional rules, membership is checked even for empty
/// values unless [`Membership::skip_empty`] was called. An empty allowed
/// list rejects every value.
#[derive(Debug, Clone)]
pub struct Membership {
    allowed: Vec<String>,
    skip_empty: bool,
    message: Option<String>,
}

impl Membership {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            skip_empty: false,
            message: None,
        }
    }

    /// Apply the shared empty-value policy before checking membership
    pub fn skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Override the default message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }
}

impl Rule for Membership {
    fn name(&self) -> &str {
        "membership"
    }

    fn ignore_when_empty(&self) -> bool {
        true
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if self.skip_empty && !self.should_run(value) {
            return None;
        }

        let found = value
            .as_text()
            .is_some_and(|text| self.allowed.iter().any(|allowed| allowed == text));

        if found {
            None
        } else {
            Some(message_or(self.message.as_deref(), || {
                format!("must be one of {}", self.allowed.join(","))
            }))
        }
    }
}

type CheckFn = Arc<dyn Fn(FieldValue<'_>) -> Option<String> + Send + Sync>;

/// Rule backed by a caller-supplied closure.
///
/// A panic inside the closure is not caught.
#[derive(Clone)]
pub struct Custom {
    name: String,
    check: CheckFn,
    ignore_when_empty: bool,
    message: Option<String>,
}

impl Custom {
    /// Custom rule that is skipped for empty values
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(FieldValue<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
            ignore_when_empty: true,
            message: None,
        }
    }

    /// Custom rule that also runs for empty values
    pub fn always<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(FieldValue<'_>) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            ignore_when_empty: false,
            ..Self::new(name, check)
        }
    }

    /// Replace whatever message the closure returns
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("ignore_when_empty", &self.ignore_when_empty)
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

impl Rule for Custom {
    fn name(&self) -> &str {
        &self.name
    }

    fn ignore_when_empty(&self) -> bool {
        self.ignore_when_empty
    }

    fn evaluate(&self, value: FieldValue<'_>) -> Option<String> {
        if !self.should_run(value) {
            return None;
        }

        let message = (self.check)(value)?;
        Some(message_or(self.message.as_deref(), || message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_required() {
        let rule = Required::new();
        assert_eq!(rule.check("John"), None);
        assert_eq!(rule.check(""), Some("This field is required".to_string()));
        assert_eq!(rule.check("   "), Some("This field is required".to_string()));
        assert!(rule.evaluate(FieldValue::Absent).is_some());
        assert!(rule.evaluate(FieldValue::Null).is_some());
        assert_eq!(rule.check(0.0), None);
        assert!(rule.should_run(FieldValue::Absent));
    }

    #[test]
    fn test_required_custom_message() {
        let rule = Required::new().with_message("Name is required");
        assert_eq!(rule.check(""), Some("Name is required".to_string()));
    }

    #[test]
    fn test_min_length() {
        let rule = MinLength::new(5);
        assert_eq!(
            rule.check("abcd"),
            Some("must be at least 5 characters long".to_string())
        );
        assert_eq!(rule.check("abcde"), None);
        assert_eq!(rule.check(""), None);
        assert_eq!(rule.evaluate(FieldValue::Absent), None);
    }

    #[test]
    fn test_min_length_rejects_unmeasurable_values() {
        assert!(MinLength::new(1).check(42.0).is_some());
        assert!(MinLength::new(1).check(true).is_some());
    }

    #[test]
    fn test_min_length_counts_utf16_units() {
        assert_eq!(MinLength::new(2).check("😀"), None);
        assert!(MaxLength::new(1).check("😀").is_some());
    }

    #[test]
    fn test_custom_messages_override_defaults() {
        assert_eq!(
            MinLength::new(5).with_message("too short").check("abc"),
            Some("too short".to_string())
        );
        assert_eq!(
            MaxLength::new(2).with_message("too long").check("abc"),
            Some("too long".to_string())
        );
        assert_eq!(
            IsEmail::new().with_message("bad email").check("nope"),
            Some("bad email".to_string())
        );
        assert_eq!(
            Membership::new(["a"]).with_message("pick a").check("b"),
            Some("pick a".to_string())
        );
        assert_eq!(MinLength::new(5).with_message("too short").check("abcdef"), None);
    }

    #[test]
    fn test_max_length() {
        let rule = MaxLength::new(3);
        assert_eq!(rule.check("ab"), None);
        assert_eq!(
            rule.check("abcd"),
            Some("can be at most 3 characters long".to_string())
        );
        assert_eq!(rule.evaluate(FieldValue::Null), None);
    }

    #[test]
    fn test_length_of_lists() {
        let tags = json!(["a", "b", "c"]);
        assert!(MaxLength::new(2).check(&tags).is_some());
        assert!(MinLength::new(3).check(&tags).is_none());
    }

    #[test]
    fn test_is_email() {
        let rule = IsEmail::new();
        assert_eq!(rule.check("a@b.com"), None);
        assert_eq!(rule.check("first.last@sub.example.org"), None);
        assert_eq!(
            rule.check("not-an-email"),
            Some("must be a valid email format".to_string())
        );
        assert!(rule.check("a b@c.com").is_some());
        assert!(rule.check("a@@b.com").is_some());
        assert!(rule.check("a@b").is_some());
        assert_eq!(rule.check(""), None);
    }

    #[test]
    fn test_numeric_range() {
        let rule = NumericRange::new(1.0, 10.0);
        assert_eq!(rule.check("5"), None);
        assert_eq!(rule.check("1"), None);
        assert_eq!(rule.check("10"), None);
        assert_eq!(rule.check(" 7.5 "), None);
        assert_eq!(
            rule.check("20"),
            Some("must be between 1 and 10".to_string())
        );
        assert_eq!(rule.check("x"), Some("must be numeric".to_string()));
        assert_eq!(rule.check("NaN"), Some("must be numeric".to_string()));
        assert_eq!(rule.check("-"), Some("must be numeric".to_string()));
        assert_eq!(rule.check(3.0), None);
        assert_eq!(rule.check(""), None);
    }

    #[test]
    fn test_numeric_range_reads_leading_number() {
        let rule = NumericRange::new(1.0, 100.0);
        assert_eq!(rule.check("12abc"), None);
        assert_eq!(rule.check("12px"), None);
        assert_eq!(rule.check("  .5e1 apples"), None);
        assert_eq!(rule.check("1e"), None);
        assert_eq!(rule.check("7."), None);
        assert_eq!(rule.check("abc12"), Some("must be numeric".to_string()));
        assert_eq!(rule.check("px 12"), Some("must be numeric".to_string()));
        assert_eq!(
            rule.check("500kg"),
            Some("must be between 1 and 100".to_string())
        );
        assert_eq!(
            rule.check("-Infinity"),
            Some("must be between 1 and 100".to_string())
        );
    }

    #[test]
    fn test_numeric_range_formats_fractional_bounds() {
        let rule = NumericRange::new(0.5, 2.25);
        assert_eq!(
            rule.check("3"),
            Some("must be between 0.5 and 2.25".to_string())
        );
    }

    #[test]
    fn test_numeric_range_custom_message_covers_both_failures() {
        let rule = NumericRange::new(1.0, 10.0).with_message("bad score");
        assert_eq!(rule.check("x"), Some("bad score".to_string()));
        assert_eq!(rule.check("11"), Some("bad score".to_string()));
    }

    #[test]
    fn test_inverted_range_rejects_everything() {
        let rule = NumericRange::new(10.0, 1.0);
        assert!(rule.check("5").is_some());
    }

    #[test]
    fn test_membership() {
        let rule = Membership::new(["a", "b"]);
        assert_eq!(rule.check("a"), None);
        assert_eq!(rule.check("c"), Some("must be one of a,b".to_string()));
    }

    #[test]
    fn test_membership_checks_empty_values() {
        let rule = Membership::new(["a", "b"]);
        assert!(!rule.should_run(FieldValue::Absent));
        assert!(rule.evaluate(FieldValue::Absent).is_some());
        assert!(rule.check("").is_some());

        let skipping = Membership::new(["a", "b"]).skip_empty();
        assert_eq!(skipping.evaluate(FieldValue::Absent), None);
        assert_eq!(skipping.check(""), None);
        assert!(skipping.check("c").is_some());
    }

    #[test]
    fn test_membership_empty_string_allowed() {
        let rule = Membership::new(["", "x"]);
        assert_eq!(rule.check(""), None);
    }

    #[test]
    fn test_membership_compares_text_only() {
        let rule = Membership::new(["1", "2"]);
        assert!(rule.check(1.0).is_some());
    }

    #[test]
    fn test_custom_rule() {
        let rule = Custom::new("lowercase", |value| match value.as_text() {
            Some(text) if text.chars().any(char::is_uppercase) => {
                Some("must be lowercase".to_string())
            }
            _ => None,
        });

        assert_eq!(rule.name(), "lowercase");
        assert_eq!(rule.check("abc"), None);
        assert_eq!(rule.check("aBc"), Some("must be lowercase".to_string()));
        assert_eq!(rule.evaluate(FieldValue::Absent), None);
    }

    #[test]
    fn test_custom_rule_always_runs() {
        let rule = Custom::always("present", |value| {
            value.is_empty().then(|| "missing".to_string())
        })
        .with_message("please fill in");

        assert_eq!(rule.evaluate(FieldValue::Absent), Some("please fill in".to_string()));
        assert_eq!(rule.check("x"), None);
    }
}
