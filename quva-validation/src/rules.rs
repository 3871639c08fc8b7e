// Rule set builders

use crate::{FieldValue, Record, Rule, ValidationReport, runner};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to a rule
pub type RuleRef = Arc<dyn Rule>;

/// Ordered rules for a single field
#[derive(Clone)]
pub struct FieldRules {
    field: String,
    rules: Vec<RuleRef>,
}

impl FieldRules {
    /// Create new validation rules for a field
    pub fn for_field(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule
    #[allow(clippy::should_implement_trait)]
    pub fn add<R: Rule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Append a rule that is shared with other rule sets
    pub fn add_shared(mut self, rule: RuleRef) -> Self {
        self.rules.push(rule);
        self
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[RuleRef] {
        &self.rules
    }

    /// Run every rule against a value, returning messages in rule order
    pub fn evaluate(&self, value: FieldValue<'_>) -> Vec<String> {
        runner::evaluate_rules(&self.field, &self.rules, value)
    }
}

impl fmt::Debug for FieldRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRules")
            .field("field", &self.field)
            .field("rules", &RuleNames(&self.rules))
            .finish()
    }
}

/// Mapping from field name to its ordered rules.
///
/// Field names are unique; adding rules for a field that already has some
/// appends to its list. Iteration is in field-name order.
#[derive(Clone, Default)]
pub struct RuleSet {
    fields: BTreeMap<String, Vec<RuleRef>>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add rules for a field
    pub fn field(mut self, rules: FieldRules) -> Self {
        self.fields
            .entry(rules.field)
            .or_default()
            .extend(rules.rules);
        self
    }

    /// Add a single rule for a field
    pub fn rule<R: Rule + 'static>(self, field: impl Into<String>, rule: R) -> Self {
        self.shared(field, Arc::new(rule))
    }

    /// Add a shared rule for a field
    pub fn shared(mut self, field: impl Into<String>, rule: RuleRef) -> Self {
        self.insert(field, rule);
        self
    }

    /// Append a rule to a field in place
    pub fn insert(&mut self, field: impl Into<String>, rule: RuleRef) {
        self.fields.entry(field.into()).or_default().push(rule);
    }

    /// Number of fields with rules
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names, in iteration order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Rules registered for a field
    pub fn rules_for(&self, field: &str) -> Option<&[RuleRef]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    /// Iterate fields with their rules
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[RuleRef])> {
        self.fields
            .iter()
            .map(|(field, rules)| (field.as_str(), rules.as_slice()))
    }

    /// Validate a record against every field in the set
    pub fn validate<R: Record + ?Sized>(&self, record: &R) -> ValidationReport {
        runner::run_validation(record, self)
    }
}

impl FromIterator<FieldRules> for RuleSet {
    fn from_iter<I: IntoIterator<Item = FieldRules>>(iter: I) -> Self {
        iter.into_iter().fold(RuleSet::new(), RuleSet::field)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(
                self.fields
                    .iter()
                    .map(|(field, rules)| (field, RuleNames(rules))),
            )
            .finish()
    }
}

struct RuleNames<'a>(&'a [RuleRef]);

impl fmt::Debug for RuleNames<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|rule| rule.name()))
            .finish()
    }
}
