//! Backend de ConectaCare
//!
//! API REST del mercado de servicios de cuidado: registro de clientes y
//! trabajadores, anuncios, solicitudes, evaluaciones, mensajes y panel de
//! administración.

pub mod clients;
pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;

use axum::{http::Uri, middleware::from_fn_with_state, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::{auth_middleware, cors_layer};
use crate::routes::{
    admin_routes::create_admin_router, anuncio_routes::create_anuncio_router,
    evaluacion_routes::create_evaluacion_router, health_routes::create_health_router,
    mensaje_routes::create_mensaje_router, solicitud_routes::create_solicitud_router,
    usuario_routes::create_usuario_router,
};
use crate::state::AppState;
use crate::utils::errors::{not_found_error, AppError};

/// Router completo con autenticación, CORS y trazas
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config);

    Router::new()
        .nest("/api/public", create_health_router())
        .nest("/usuarios", create_usuario_router())
        .nest("/anuncios", create_anuncio_router())
        .nest("/solicitudes", create_solicitud_router())
        .nest("/evaluaciones", create_evaluacion_router())
        .nest("/mensajes", create_mensaje_router())
        .nest("/admin", create_admin_router())
        .fallback(route_not_found)
        .layer(from_fn_with_state(state.clone(), auth_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn route_not_found(uri: Uri) -> AppError {
    not_found_error(&format!("Ruta no encontrada: {}", uri.path()))
}
