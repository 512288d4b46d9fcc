use crate::{AppState, envelope::Envelope, error::AppError, extract::ValidatedJson};
use axum::extract::{Path, State};
use axum_extra::extract::WithRejection;
use core_types::{ReservationInput, Value};
use database::DbError;
use std::sync::Arc;

pub const WELCOME_MESSAGE: &str = "Bienvenido a la API de ReservaFacil!";
pub const LIST_MESSAGE: &str = "Reservas obtenidas con éxito";
pub const CREATED_MESSAGE: &str = "Reserva creada con éxito";
pub const UPDATED_MESSAGE: &str = "Reserva actualizada con éxito";
pub const DELETED_MESSAGE: &str = "Reserva eliminada con éxito";
pub const NOT_FOUND_MESSAGE: &str = "Reserva no encontrada";

type ReservationId = WithRejection<Path<i32>, AppError>;

fn reservation_not_found(err: DbError) -> AppError {
    match err {
        DbError::NotFound => AppError::NotFound(NOT_FOUND_MESSAGE.to_string()),
        other => AppError::Database(other),
    }
}

/// # GET /
pub async fn home() -> &'static str {
    WELCOME_MESSAGE
}

/// # GET /reservas
pub async fn list_reservations(State(state): State<Arc<AppState>>) -> Result<Envelope, AppError> {
    let reservations = state.repo.list_reservations().await?;
    Ok(Envelope::success(LIST_MESSAGE, Value::from(reservations)))
}

/// # POST /create_reserva
pub async fn create_reservation(
    State(state): State<Arc<AppState>>,
    ValidatedJson(input): ValidatedJson<ReservationInput>,
) -> Result<Envelope, AppError> {
    let reservation = state.repo.create_reservation(&input).await?;
    tracing::info!(
        id = reservation.id,
        numero_mesa = reservation.numero_mesa,
        fecha = %reservation.fecha,
        hora = %reservation.hora,
        "Reservation created."
    );
    Ok(Envelope::success(CREATED_MESSAGE, reservation))
}

/// # PUT /update_reserva/:id
pub async fn update_reservation(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): ReservationId,
    ValidatedJson(input): ValidatedJson<ReservationInput>,
) -> Result<Envelope, AppError> {
    let reservation = state
        .repo
        .update_reservation(id, &input)
        .await
        .map_err(reservation_not_found)?;
    tracing::info!(id, numero_mesa = reservation.numero_mesa, "Reservation updated.");
    Ok(Envelope::success(UPDATED_MESSAGE, reservation))
}

/// # DELETE /delete_reserva/:id
/// Also marks the reservation's table as available.
pub async fn delete_reservation(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(id), _): ReservationId,
) -> Result<Envelope, AppError> {
    let numero_mesa = state
        .repo
        .delete_reservation(id)
        .await
        .map_err(reservation_not_found)?;
    tracing::info!(id, numero_mesa, "Reservation deleted, table released.");
    Ok(Envelope::success_empty(DELETED_MESSAGE))
}
