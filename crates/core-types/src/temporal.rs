//! Rendering of [`Value`] trees into JSON.
//!
//! Lists map element-wise, maps map value-wise with their keys untouched,
//! and date/time leaves become ISO-8601 strings. Every other leaf passes
//! through unchanged.

use chrono::SecondsFormat;
use serde_json::{Map, Number, Value as JsonValue};

use crate::value::Value;

/// `2024-05-01`
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// `19:00:00`, with a fractional part only when one is present.
pub const TIME_FORMAT: &str = "%H:%M:%S%.f";
/// `2024-05-01T19:00:00`
pub const DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

pub fn serialize(value: &Value) -> JsonValue {
    match value {
        Value::List(items) => JsonValue::Array(items.iter().map(serialize).collect()),
        Value::Map(fields) => JsonValue::Object(
            fields
                .iter()
                .map(|(key, v)| (key.clone(), serialize(v)))
                .collect::<Map<_, _>>(),
        ),
        Value::Date(d) => JsonValue::String(d.format(DATE_FORMAT).to_string()),
        Value::Time(t) => JsonValue::String(t.format(TIME_FORMAT).to_string()),
        Value::DateTime(dt) => JsonValue::String(dt.format(DATETIME_FORMAT).to_string()),
        Value::DateTimeUtc(dt) => {
            JsonValue::String(dt.to_rfc3339_opts(SecondsFormat::AutoSi, false))
        }
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Int(i) => JsonValue::Number((*i).into()),
        // NaN and infinities have no JSON representation.
        Value::Float(f) => Number::from_f64(*f).map_or(JsonValue::Null, JsonValue::Number),
        Value::Decimal(d) => JsonValue::String(d.to_string()),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::Uuid(u) => JsonValue::String(u.hyphenated().to_string()),
        Value::Json(j) => j.clone(),
    }
}
