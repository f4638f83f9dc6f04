//! Controladores HTTP
//!
//! Traducen cada operación de los servicios a una respuesta HTTP: código de
//! estado, cuerpo JSON y cabecera de efecto secundario degradado.

pub mod admin_controller;
pub mod anuncio_controller;
pub mod evaluacion_controller;
pub mod mensaje_controller;
pub mod solicitud_controller;
pub mod usuario_controller;

use axum::{http::StatusCode, response::Response, Json};
use serde::Serialize;

use crate::utils::BestEffort;

/// 201 con el valor creado
pub(crate) fn created<T: Serialize>(outcome: BestEffort<T>) -> Response {
    outcome.into_response_with(|value| (StatusCode::CREATED, Json(value)))
}

/// 200 con el valor
pub(crate) fn ok<T: Serialize>(outcome: BestEffort<T>) -> Response {
    outcome.into_response_with(Json)
}
