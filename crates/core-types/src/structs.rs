use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::error::CoreError;
use crate::value::Value;

/// Upper bounds mirror the column widths of `public.reservas`.
pub const MAX_ESTADO_LEN: usize = 50;
pub const MAX_USUARIO_LEN: usize = 100;

/// Checks a request body once it has been deserialized.
pub trait Validate {
    fn validate(&self) -> Result<(), CoreError>;
}

/// A row of `public.reservas`.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i32,
    pub fecha: NaiveDate,
    pub hora: NaiveTime,
    /// Free-text state label (e.g. "confirmada").
    pub estado: String,
    pub detalle: Option<String>,
    pub usuario_responsable: String,
    /// References `mesas.numero_mesa`.
    pub numero_mesa: i32,
}

impl From<Reservation> for Value {
    fn from(r: Reservation) -> Self {
        Value::map([
            ("id", Value::from(r.id)),
            ("fecha", Value::from(r.fecha)),
            ("hora", Value::from(r.hora)),
            ("estado", Value::from(r.estado)),
            ("detalle", Value::from(r.detalle)),
            ("usuario_responsable", Value::from(r.usuario_responsable)),
            ("numero_mesa", Value::from(r.numero_mesa)),
        ])
    }
}

/// Body of `POST /create_reserva` and `PUT /update_reserva/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReservationInput {
    pub fecha: NaiveDate,
    #[serde(deserialize_with = "deserialize_hora")]
    pub hora: NaiveTime,
    pub estado: String,
    #[serde(default)]
    pub detalle: Option<String>,
    pub usuario_responsable: String,
    pub numero_mesa: i32,
}

impl Validate for ReservationInput {
    fn validate(&self) -> Result<(), CoreError> {
        check_text("estado", &self.estado, MAX_ESTADO_LEN)?;
        check_text("usuario_responsable", &self.usuario_responsable, MAX_USUARIO_LEN)?;
        if self.numero_mesa <= 0 {
            return Err(CoreError::invalid(
                "numero_mesa",
                "debe ser un entero positivo",
            ));
        }
        Ok(())
    }
}

fn check_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "no puede estar vacío"));
    }
    if value.chars().count() > max_len {
        return Err(CoreError::invalid(
            field,
            format!("no puede superar {max_len} caracteres"),
        ));
    }
    Ok(())
}

/// Accepts `HH:MM` as well as `HH:MM:SS[.fff]`.
fn deserialize_hora<'de, D>(deserializer: D) -> Result<NaiveTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveTime::parse_from_str(&raw, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(&raw, "%H:%M"))
        .map_err(|_| serde::de::Error::custom(format!("hora inválida `{raw}`, se espera HH:MM o HH:MM:SS")))
}
