//! Sistema de manejo de errores
//!
//! Este módulo define todos los tipos de errores del sistema
//! y su conversión a respuestas HTTP apropiadas.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::clients::IdentityError;
use crate::database::StoreError;

/// Mensaje genérico para errores internos; el detalle solo va al log.
const MENSAJE_ERROR_INTERNO: &str = "Se ha producido un error en el servidor.";

/// Errores principales de la aplicación
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Identity provider error: {0}")]
    Identity(#[from] IdentityError),
}

/// Respuesta de error para la API: un único campo `error`.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl AppError {
    /// Código HTTP que corresponde a cada tipo de error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Identity(IdentityError::InvalidToken(_)) => StatusCode::UNAUTHORIZED,
            AppError::Identity(IdentityError::EmailAlreadyExists(_)) => StatusCode::CONFLICT,
            AppError::Identity(IdentityError::AccountNotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Identity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Mensaje visible para el cliente.
    fn public_message(&self) -> String {
        match self {
            AppError::Unauthorized(msg)
            | AppError::Forbidden(msg)
            | AppError::NotFound(msg)
            | AppError::BadRequest(msg)
            | AppError::Conflict(msg) => msg.clone(),
            AppError::Validation(errors) => first_validation_message(errors),
            AppError::Store(StoreError::NotFound { collection, .. }) => {
                format!("Documento no encontrado en '{}'", collection)
            }
            AppError::Identity(IdentityError::InvalidToken(_)) => {
                "Token de Firebase inválido o expirado".to_string()
            }
            AppError::Identity(IdentityError::EmailAlreadyExists(email)) => {
                format!("El email '{}' ya está registrado", email)
            }
            AppError::Identity(IdentityError::AccountNotFound(_)) => {
                "Cuenta no encontrada en el proveedor de identidad".to_string()
            }
            AppError::Internal(_) | AppError::Store(_) | AppError::Identity(_) => {
                MENSAJE_ERROR_INTERNO.to_string()
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("⚠️ {}", self);
        }

        let body = ErrorResponse {
            error: self.public_message(),
        };

        (status, Json(body)).into_response()
    }
}

/// Resultado tipado para operaciones que pueden fallar
pub type AppResult<T> = Result<T, AppError>;

/// Primer mensaje legible de un conjunto de errores de validación
fn first_validation_message(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    fields
        .into_iter()
        .find_map(|(field, field_errors)| {
            field_errors.first().map(|error| match &error.message {
                Some(message) => message.to_string(),
                None => format!("El campo '{}' no es válido", field),
            })
        })
        .unwrap_or_else(|| "Los datos proporcionados no son válidos".to_string())
}

/// Función helper para crear errores de recurso no encontrado
pub fn not_found_error(message: &str) -> AppError {
    AppError::NotFound(message.to_string())
}
