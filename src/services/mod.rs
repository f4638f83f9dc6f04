//! Services module
//!
//! Lógica de negocio. Cada servicio recibe sus dependencias (almacén,
//! proveedor de identidad) al construirse y no guarda estado propio entre
//! peticiones.

pub mod admin_service;
pub mod anuncio_service;
pub mod estadistica_service;
pub mod evaluacion_service;
pub mod mensaje_service;
pub mod solicitud_service;
pub mod usuario_service;

pub use admin_service::AdminService;
pub use anuncio_service::AdService;
pub use estadistica_service::StatisticsService;
pub use evaluacion_service::EvaluationService;
pub use mensaje_service::MessageService;
pub use solicitud_service::ApplicationService;
pub use usuario_service::UserService;

use serde::de::DeserializeOwned;

use crate::database::{from_document, DocumentStore};
use crate::models::{AuthContext, Role};
use crate::utils::errors::{AppError, AppResult};

/// Carga un documento tipado o devuelve 404 con el mensaje indicado
pub(crate) async fn load_document<T: DeserializeOwned>(
    store: &dyn DocumentStore,
    collection: &str,
    id: &str,
    not_found: &str,
) -> AppResult<T> {
    match store.get(collection, id).await? {
        Some(document) => Ok(from_document(document)?),
        None => Err(AppError::NotFound(not_found.to_string())),
    }
}

/// Exige que quien llama tenga el rol indicado
pub(crate) fn ensure_role(context: &AuthContext, role: Role, message: &str) -> AppResult<()> {
    if context.has_role(role) {
        Ok(())
    } else {
        Err(AppError::Forbidden(message.to_string()))
    }
}
