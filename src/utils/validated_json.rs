//! Extractor JSON con validación
//!
//! Equivalente a `Json<T>` pero convierte los errores de parseo y de
//! `validator` en `AppError`, para que salgan con el sobre `{"error": ...}`.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::utils::errors::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| {
                tracing::debug!("JSON rechazado: {}", rejection.body_text());
                AppError::BadRequest("No se puede parsear el objeto JSON".to_string())
            })?;

        value.validate()?;
        Ok(ValidatedJson(value))
    }
}
