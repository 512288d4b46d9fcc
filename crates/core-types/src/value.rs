//! A dynamically typed value for outbound payloads.
//!
//! Rows leave the database either as typed structs (`Reservation`) or as
//! dynamically decoded column maps (audit records). Both end up as a `Value`
//! tree so one serialization step (see [`crate::temporal`]) renders every
//! response body the same way.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use serde_json::Value as JsonValue;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Decimal(Decimal),
    Text(String),
    Uuid(Uuid),
    Date(NaiveDate),
    Time(NaiveTime),
    DateTime(NaiveDateTime),
    DateTimeUtc(DateTime<Utc>),
    Json(JsonValue),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Builds a `Map` from `(key, value)` pairs.
    pub fn map<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Value::Date(_) | Value::Time(_) | Value::DateTime(_) | Value::DateTimeUtc(_)
        )
    }

    /// Looks up a key when this value is a `Map`.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::Map(fields) => fields.get(key),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        crate::temporal::serialize(self).serialize(serializer)
    }
}

macro_rules! impl_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::$variant(v.into())
                }
            }
        )*
    };
}

impl_from! {
    bool => Bool,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    f32 => Float,
    f64 => Float,
    Decimal => Decimal,
    String => Text,
    &str => Text,
    Uuid => Uuid,
    NaiveDate => Date,
    NaiveTime => Time,
    NaiveDateTime => DateTime,
    DateTime<Utc> => DateTimeUtc,
    JsonValue => Json,
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_none_becomes_null() {
        let v: Value = Option::<i32>::None.into();
        assert_eq!(v, Value::Null);
        let v: Value = Some("x").into();
        assert_eq!(v, Value::Text("x".to_string()));
    }

    #[test]
    fn map_builder_and_lookup() {
        let row = Value::map([("id", Value::from(7i32)), ("estado", Value::from("libre"))]);
        assert_eq!(row.get("id"), Some(&Value::Int(7)));
        assert_eq!(row.get("missing"), None);
        assert_eq!(Value::Int(1).get("id"), None);
    }

    #[test]
    fn map_keys_serialize_sorted() {
        let row = Value::map([
            ("numero_mesa", Value::from(3i32)),
            ("id", Value::from(1i32)),
            ("fecha", Value::from("x")),
        ]);
        assert_eq!(
            serde_json::to_string(&row).unwrap(),
            r#"{"fecha":"x","id":1,"numero_mesa":3}"#
        );
    }

    #[test]
    fn temporal_detection() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert!(Value::from(date).is_temporal());
        assert!(!Value::from("2024-05-01").is_temporal());
        assert!(!Value::List(vec![Value::from(date)]).is_temporal());
    }
}
