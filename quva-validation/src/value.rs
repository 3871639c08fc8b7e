// Field values and records

use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// The value of a single field, as seen by a rule.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// The record has no such field
    Absent,
    /// The field is present but explicitly null
    Null,
    /// Text value
    Text(&'a str),
    /// Numeric value
    Number(f64),
    /// Boolean value
    Bool(bool),
    /// Sequence value
    List(&'a [Value]),
    /// Nested object value
    Object(&'a Map<String, Value>),
}

impl<'a> FieldValue<'a> {
    /// Whether the value counts as empty: absent, null, or an empty string.
    ///
    /// Whitespace-only text is *not* empty here; only [`Required`](crate::Required)
    /// trims before checking.
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Absent | FieldValue::Null | FieldValue::Text(""))
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&'a str> {
        match self {
            FieldValue::Text(text) => Some(*text),
            _ => None,
        }
    }

    /// Measurable length: UTF-16 code units for text, elements for lists.
    ///
    /// Characters outside the Basic Multilingual Plane count twice.
    pub fn length(&self) -> Option<usize> {
        match self {
            FieldValue::Text(text) => Some(text.encode_utf16().count()),
            FieldValue::List(items) => Some(items.len()),
            _ => None,
        }
    }

    /// Borrow a JSON value as a field value
    pub fn from_json(value: &'a Value) -> Self {
        match value {
            Value::Null => FieldValue::Null,
            Value::Bool(b) => FieldValue::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(FieldValue::Null, FieldValue::Number),
            Value::String(s) => FieldValue::Text(s),
            Value::Array(items) => FieldValue::List(items),
            Value::Object(map) => FieldValue::Object(map),
        }
    }
}

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Text(value)
    }
}

impl<'a> From<Option<&'a str>> for FieldValue<'a> {
    fn from(value: Option<&'a str>) -> Self {
        value.map_or(FieldValue::Null, FieldValue::Text)
    }
}

impl From<f64> for FieldValue<'_> {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue<'_> {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl<'a> From<&'a Value> for FieldValue<'a> {
    fn from(value: &'a Value) -> Self {
        FieldValue::from_json(value)
    }
}

/// Types that can be viewed as a field value
pub trait AsFieldValue {
    fn as_field_value(&self) -> FieldValue<'_>;
}

impl AsFieldValue for String {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for &str {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Text(self)
    }
}

impl AsFieldValue for f64 {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Number(*self)
    }
}

impl AsFieldValue for i64 {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Number(*self as f64)
    }
}

impl AsFieldValue for bool {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::Bool(*self)
    }
}

impl AsFieldValue for Value {
    fn as_field_value(&self) -> FieldValue<'_> {
        FieldValue::from_json(self)
    }
}

impl<T: AsFieldValue> AsFieldValue for Option<T> {
    fn as_field_value(&self) -> FieldValue<'_> {
        match self {
            Some(value) => value.as_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// A structured value exposing named fields.
///
/// Looking up a field the record does not have yields [`FieldValue::Absent`].
pub trait Record {
    fn field(&self, name: &str) -> FieldValue<'_>;
}

impl<R: Record + ?Sized> Record for &R {
    fn field(&self, name: &str) -> FieldValue<'_> {
        (**self).field(name)
    }
}

impl<K, V, S> Record for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsFieldValue,
    S: BuildHasher,
{
    fn field(&self, name: &str) -> FieldValue<'_> {
        self.get(name)
            .map_or(FieldValue::Absent, AsFieldValue::as_field_value)
    }
}

impl<K, V> Record for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsFieldValue,
{
    fn field(&self, name: &str) -> FieldValue<'_> {
        self.get(name)
            .map_or(FieldValue::Absent, AsFieldValue::as_field_value)
    }
}

impl Record for Map<String, Value> {
    fn field(&self, name: &str) -> FieldValue<'_> {
        self.get(name).map_or(FieldValue::Absent, FieldValue::from_json)
    }
}

impl Record for Value {
    fn field(&self, name: &str) -> FieldValue<'_> {
        match self {
            Value::Object(map) => map.field(name),
            _ => FieldValue::Absent,
        }
    }
}
