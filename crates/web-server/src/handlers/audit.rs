use crate::{AppState, envelope::Envelope, error::AppError};
use axum::extract::State;
use core_types::Value;
use std::sync::Arc;

pub const LIST_MESSAGE: &str = "Registros de auditoría obtenidos con éxito";

/// # GET /auditoria
/// Every row of the audit table, columns as stored.
pub async fn list_audit_records(
    State(state): State<Arc<AppState>>,
) -> Result<Envelope, AppError> {
    let records = state.repo.list_audit_records().await?;
    tracing::debug!(count = records.len(), "Audit records fetched.");
    Ok(Envelope::success(LIST_MESSAGE, Value::List(records)))
}
