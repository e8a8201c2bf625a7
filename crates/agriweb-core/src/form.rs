//! Form serialization: submitted input strings to a JSON payload

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;
use std::str::FromStr;

use crate::descriptor::{InputKind, ResourceDescriptor};
use crate::models::Record;
use crate::view::FormState;

/// Build the request payload from submitted form fields
///
/// Only the descriptor's form fields are taken, so the id never travels in
/// the body. Numeric inputs are coerced without validation: anything that
/// does not parse is sent as `null`.
pub fn build_payload(descriptor: &ResourceDescriptor, fields: &HashMap<String, String>) -> Map<String, Value> {
    let mut payload = Map::new();
    for field in descriptor.form_fields {
        let raw = fields.get(field.name);
        let value = match field.input {
            InputKind::Text | InputKind::Phone => match raw {
                Some(s) => Value::String(s.clone()),
                None => continue,
            },
            InputKind::Decimal => raw.map(|s| coerce_decimal(s)).unwrap_or(Value::Null),
            InputKind::Reference(_) => raw.map(|s| coerce_integer(s)).unwrap_or(Value::Null),
        };
        payload.insert(field.name.to_string(), value);
    }

    for key in fields.keys() {
        if descriptor.form_field(key).is_none() {
            log::debug!("Dropping unexpected form field '{}' for {}", key, descriptor.kind);
        }
    }

    payload
}

fn coerce_decimal(raw: &str) -> Value {
    Decimal::from_str(raw.trim())
        .ok()
        .and_then(|d| d.to_f64())
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn coerce_integer(raw: &str) -> Value {
    raw.trim()
        .parse::<i64>()
        .map(|i| Value::Number(i.into()))
        .unwrap_or(Value::Null)
}

/// Copy matching record values into the form; inputs the record lacks keep their value
pub fn prefill(form: &mut FormState, descriptor: &ResourceDescriptor, record: &Record) {
    for field in descriptor.form_fields {
        if record.has_field(field.name) {
            form.set(field.name, record.text(field.name));
        }
    }
}
