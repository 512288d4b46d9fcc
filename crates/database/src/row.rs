//! Decoding of rows whose shape is not known at compile time.
//!
//! Used for `SELECT *` over tables the services do not own (the audit log).
//! Each column is decoded according to its Postgres type into a
//! [`core_types::Value`]; unsupported types come back as `Null` with a warning.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use core_types::Value;
use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use sqlx::postgres::{PgColumn, PgRow};
use sqlx::{Column, Row, TypeInfo};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::error::DbError;

/// Decodes a whole row into a `Value::Map` keyed by column name.
pub fn decode_row(row: &PgRow) -> Result<Value, DbError> {
    let mut fields = BTreeMap::new();
    for column in row.columns() {
        fields.insert(column.name().to_string(), decode_column(row, column)?);
    }
    Ok(Value::Map(fields))
}

fn decode_column(row: &PgRow, column: &PgColumn) -> Result<Value, sqlx::Error> {
    let idx = column.ordinal();
    let value: Value = match column.type_info().name() {
        "BOOL" => row.try_get::<Option<bool>, _>(idx)?.into(),
        "INT2" => row.try_get::<Option<i16>, _>(idx)?.into(),
        "INT4" => row.try_get::<Option<i32>, _>(idx)?.into(),
        "INT8" => row.try_get::<Option<i64>, _>(idx)?.into(),
        "FLOAT4" => row.try_get::<Option<f32>, _>(idx)?.into(),
        "FLOAT8" => row.try_get::<Option<f64>, _>(idx)?.into(),
        "NUMERIC" => row.try_get::<Option<Decimal>, _>(idx)?.into(),
        "TEXT" | "VARCHAR" | "BPCHAR" | "NAME" | "CITEXT" => {
            row.try_get::<Option<String>, _>(idx)?.into()
        }
        "UUID" => row.try_get::<Option<Uuid>, _>(idx)?.into(),
        "DATE" => row.try_get::<Option<NaiveDate>, _>(idx)?.into(),
        "TIME" => row.try_get::<Option<NaiveTime>, _>(idx)?.into(),
        "TIMESTAMP" => row.try_get::<Option<NaiveDateTime>, _>(idx)?.into(),
        "TIMESTAMPTZ" => row.try_get::<Option<DateTime<Utc>>, _>(idx)?.into(),
        "JSON" | "JSONB" => row.try_get::<Option<JsonValue>, _>(idx)?.into(),
        "TEXT[]" | "VARCHAR[]" => row.try_get::<Option<Vec<String>>, _>(idx)?.into(),
        "INT4[]" => row.try_get::<Option<Vec<i32>>, _>(idx)?.into(),
        "INT8[]" => row.try_get::<Option<Vec<i64>>, _>(idx)?.into(),
        other => {
            tracing::warn!(
                column = column.name(),
                type_name = other,
                "Unsupported column type, returning null."
            );
            Value::Null
        }
    };
    Ok(value)
}
