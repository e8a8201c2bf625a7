//! Data models exchanged with the records API

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::str::FromStr;

use crate::types::RecordId;

/// A resource record as the API returns it
///
/// Records are plain JSON objects; which keys matter depends on the
/// resource type and is described by its `ResourceDescriptor`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Map<String, Value>);

impl Record {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Raw value of a field
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Whether the record carries the key at all, even as null
    pub fn has_field(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Display text for a field; missing and null become empty strings
    pub fn text(&self, field: &str) -> String {
        match self.0.get(field) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => match n.as_i64() {
                Some(i) => i.to_string(),
                None => n.as_f64().map(|f| f.to_string()).unwrap_or_else(|| n.to_string()),
            },
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
        }
    }

    /// Integer view of a field, accepting numeric strings
    pub fn integer(&self, field: &str) -> Option<RecordId> {
        match self.0.get(field)? {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Decimal view of a field, accepting numbers and numeric strings
    pub fn decimal(&self, field: &str) -> Option<Decimal> {
        match self.0.get(field)? {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(Decimal::from(i)),
                None => Decimal::from_str(&n.to_string()).ok(),
            },
            Value::String(s) => Decimal::from_str(s.trim()).ok(),
            _ => None,
        }
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Record(map),
            _ => Record::default(),
        }
    }
}

/// Error body the API sends with non-success statuses
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    /// Raw database error text
    #[serde(default)]
    pub details: Option<String>,
    /// Database error number
    #[serde(default)]
    pub code: Option<i64>,
}
