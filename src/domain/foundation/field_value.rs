//! Tagged values for the open-ended data fields carried by talks and speakers.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Number, Value};

use super::timestamp::Timestamp;

/// Ordered name → value bag. Ordering keeps projections and documents deterministic.
pub type FieldMap = BTreeMap<String, FieldValue>;

/// A single data field value.
///
/// Serializes untagged, so a document field holds a plain JSON string,
/// number, boolean, array of strings, or RFC3339 date string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(Number),
    Bool(bool),
    List(Vec<String>),
    Timestamp(Timestamp),
}

impl FieldValue {
    /// Converts a raw JSON value from the submission system.
    ///
    /// Returns `None` for values that should not be indexed at all: nulls,
    /// empty strings and nested objects. Arrays keep only their string items.
    pub fn from_json(value: Value) -> Option<Self> {
        match value {
            Value::Null => None,
            Value::String(s) if s.is_empty() => None,
            Value::String(s) => Some(FieldValue::Text(s)),
            Value::Number(n) => Some(FieldValue::Number(n)),
            Value::Bool(b) => Some(FieldValue::Bool(b)),
            Value::Array(items) => Some(FieldValue::List(
                items
                    .into_iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s),
                        _ => None,
                    })
                    .collect(),
            )),
            Value::Object(_) => None,
        }
    }

    /// Returns the string content for `Text` values.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n.into())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(items: Vec<String>) -> Self {
        FieldValue::List(items)
    }
}

impl From<Timestamp> for FieldValue {
    fn from(ts: Timestamp) -> Self {
        FieldValue::Timestamp(ts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn null_and_empty_string_are_dropped() {
        assert_eq!(FieldValue::from_json(Value::Null), None);
        assert_eq!(FieldValue::from_json(json!("")), None);
    }

    #[test]
    fn scalars_map_to_their_variants() {
        assert_eq!(FieldValue::from_json(json!("Room B")), Some("Room B".into()));
        assert_eq!(FieldValue::from_json(json!(45)), Some(45.into()));
        assert_eq!(FieldValue::from_json(json!(true)), Some(true.into()));
    }

    #[test]
    fn arrays_keep_only_strings() {
        let value = FieldValue::from_json(json!(["valid", 123, "another", null, "third"]));
        assert_eq!(
            value,
            Some(FieldValue::List(vec![
                "valid".to_string(),
                "another".to_string(),
                "third".to_string()
            ]))
        );
    }

    #[test]
    fn objects_are_not_indexable() {
        assert_eq!(FieldValue::from_json(json!({"nested": "x"})), None);
    }

    #[test]
    fn serializes_untagged() {
        let list = FieldValue::List(vec!["go".to_string(), "rust".to_string()]);
        assert_eq!(serde_json::to_value(&list).unwrap(), json!(["go", "rust"]));
        assert_eq!(serde_json::to_value(FieldValue::from(7)).unwrap(), json!(7));

        let ts = Timestamp::parse_flexible("2024-09-04 09:00:00").unwrap().unwrap();
        assert_eq!(
            serde_json::to_value(FieldValue::from(ts)).unwrap(),
            json!("2024-09-04T09:00:00Z")
        );
    }
}
