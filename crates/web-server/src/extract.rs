use axum::{
    Json,
    async_trait,
    extract::{FromRequest, Request},
};
use core_types::Validate;
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// A JSON body that has been deserialized and validated.
///
/// Missing fields, wrong types and rule violations are all rejected here
/// with an error envelope, before the handler runs.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate()?;
        Ok(Self(value))
    }
}
