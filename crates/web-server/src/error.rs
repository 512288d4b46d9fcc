use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    response::{IntoResponse, Response},
};
use core_types::CoreError;
use database::DbError;
use thiserror::Error;

use crate::envelope::Envelope;

pub const GENERIC_DB_MESSAGE: &str = "Error interno de base de datos";
pub const SLOT_TAKEN_MESSAGE: &str =
    "Ya existe una reserva para esta mesa en la fecha y hora seleccionadas.";
pub const UNKNOWN_TABLE_MESSAGE: &str = "La mesa indicada no existe.";
pub const GENERIC_NOT_FOUND_MESSAGE: &str = "Registro no encontrado";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),
    #[error("Invalid request: {0}")]
    Validation(#[from] CoreError),
    #[error("Malformed request: {0}")]
    BadRequest(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an envelope response.
///
/// Database faults are logged in full and reported to the client with a
/// generic message only.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let envelope = match self {
            AppError::Database(DbError::SlotTaken) => {
                tracing::warn!("Reservation slot already taken.");
                Envelope::error(SLOT_TAKEN_MESSAGE)
            }
            AppError::Database(DbError::UnknownTable) => {
                tracing::warn!("Reservation references an unknown table.");
                Envelope::error(UNKNOWN_TABLE_MESSAGE)
            }
            AppError::Database(DbError::NotFound) => Envelope::not_found(GENERIC_NOT_FOUND_MESSAGE),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                Envelope::error(GENERIC_DB_MESSAGE)
            }
            AppError::Validation(err) => {
                tracing::debug!(error = %err, "Request failed validation.");
                Envelope::error(err.to_string())
            }
            AppError::BadRequest(message) => {
                tracing::debug!(%message, "Malformed request.");
                Envelope::error(message)
            }
            AppError::NotFound(message) => Envelope::not_found(message),
        };
        envelope.into_response()
    }
}
