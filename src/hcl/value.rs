//! Typed configuration values.

use std::collections::BTreeMap;

use serde_json::Number;

/// Element type carried by an empty collection.
///
/// An empty collection has no elements to infer a type from, so it records
/// the element type explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
}

/// A configuration value.
///
/// `Object` keys are kept sorted so rendering is stable regardless of the
/// order the source payload used.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<Value>),
    Object(BTreeMap<String, Value>),
    /// A list with no elements and a known element type.
    EmptyList(ValueType),
    /// A map with no entries and a known element type.
    EmptyMap(ValueType),
}

impl Value {
    /// Build an object of string values, such as rule labels.
    pub fn string_map<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        Value::Object(
            entries
                .into_iter()
                .map(|(k, v)| (k.clone(), Value::from(v.as_str())))
                .collect(),
        )
    }

    /// Whether rendering the value spans several lines.
    pub(crate) fn is_multiline(&self) -> bool {
        match self {
            Value::Object(entries) => !entries.is_empty(),
            Value::List(items) => items.iter().any(Value::is_multiline),
            _ => false,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}
