//! The uniform JSON body every API route answers with.
//!
//! ```json
//! { "status": "success", "message": "Reservas obtenidas con éxito", "data": [ ... ] }
//! { "status": "error", "message": "..." }
//! { "status": "not_found", "message": "..." }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use core_types::Value;
use serde::{Serialize, Serializer, ser::SerializeStruct};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseKind {
    Success,
    Error,
    NotFound,
}

impl ResponseKind {
    pub fn status_code(self) -> StatusCode {
        match self {
            ResponseKind::Success => StatusCode::OK,
            ResponseKind::Error => StatusCode::BAD_REQUEST,
            ResponseKind::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub kind: ResponseKind,
    pub message: String,
    /// Only emitted for `success`, where it is `null` when absent.
    pub data: Option<Value>,
}

impl Envelope {
    pub fn new(kind: ResponseKind, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            kind,
            message: message.into(),
            data,
        }
    }

    pub fn success(message: impl Into<String>, data: impl Into<Value>) -> Self {
        Self::new(ResponseKind::Success, message, Some(data.into()))
    }

    /// A success carrying `"data": null`.
    pub fn success_empty(message: impl Into<String>) -> Self {
        Self::new(ResponseKind::Success, message, None)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ResponseKind::Error, message, None)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ResponseKind::NotFound, message, None)
    }

    /// The body and the status code that goes with it.
    pub fn build(
        kind: ResponseKind,
        message: impl Into<String>,
        data: Option<Value>,
    ) -> (StatusCode, Json<Envelope>) {
        (kind.status_code(), Json(Self::new(kind, message, data)))
    }

    pub fn status_code(&self) -> StatusCode {
        self.kind.status_code()
    }
}

impl Serialize for Envelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let with_data = self.kind == ResponseKind::Success;
        let mut state = serializer.serialize_struct("Envelope", if with_data { 3 } else { 2 })?;
        state.serialize_field("status", &self.kind)?;
        state.serialize_field("message", &self.message)?;
        if with_data {
            state.serialize_field("data", &self.data)?;
        }
        state.end()
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
