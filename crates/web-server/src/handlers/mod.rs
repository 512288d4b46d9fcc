pub mod audit;
pub mod reservations;

use crate::{AppState, envelope::Envelope, error::AppError};
use axum::extract::State;
use std::sync::Arc;

pub const NO_ROUTE_MESSAGE: &str = "Ruta no encontrada";

/// # GET /health
/// Succeeds once the pool can hand out a working connection.
pub async fn health(State(state): State<Arc<AppState>>) -> Result<Envelope, AppError> {
    state.repo.ping().await?;
    Ok(Envelope::success_empty("Servicio disponible"))
}

/// Any path no route matched.
pub async fn fallback() -> Envelope {
    Envelope::not_found(NO_ROUTE_MESSAGE)
}
