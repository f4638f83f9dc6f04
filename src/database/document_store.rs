//! Contrato del almacén de documentos
//!
//! Colecciones sin esquema de documentos JSON. Cada documento guarda su
//! propio `id`; el almacén solo lo usa como clave.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

pub const COLECCION_USUARIOS: &str = "usuarios";
pub const COLECCION_ANUNCIOS: &str = "anuncios";
pub const COLECCION_SOLICITUDES: &str = "solicitudes";
pub const COLECCION_EVALUACIONES: &str = "evaluaciones";
pub const COLECCION_MENSAJES: &str = "mensajes";
pub const COLECCION_CHATS: &str = "chats";
pub const COLECCION_LOGS: &str = "logEstadisticas";

/// Errores del almacén de documentos
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("document '{id}' not found in '{collection}'")]
    NotFound { collection: String, id: String },

    #[error("store backend error: {0}")]
    Backend(String),

    #[error("document (de)serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Backend(e.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Operaciones que la aplicación necesita del almacén
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Nombre del backend (para logs)
    fn name(&self) -> &str;

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>>;

    /// Escribe el documento completo, reemplazando el anterior si existe.
    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()>;

    /// Inserta solo si no existe. Devuelve `false` si el id ya estaba ocupado.
    async fn create(&self, collection: &str, id: &str, document: Value) -> StoreResult<bool>;

    /// Mezcla los campos de primer nivel. `NotFound` si el documento no existe.
    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()>;

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()>;

    async fn query_equal(&self, collection: &str, field: &str, value: &Value)
        -> StoreResult<Vec<Value>>;

    async fn query_in(&self, collection: &str, field: &str, values: &[Value])
        -> StoreResult<Vec<Value>>;

    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Value>>;
}

/// Convierte un modelo en documento
pub fn to_document<T: Serialize>(model: &T) -> StoreResult<Value> {
    Ok(serde_json::to_value(model)?)
}

/// Convierte un documento en modelo
pub fn from_document<T: DeserializeOwned>(document: Value) -> StoreResult<T> {
    Ok(serde_json::from_value(document)?)
}

/// Convierte una lista de documentos en modelos
pub fn from_documents<T: DeserializeOwned>(documents: Vec<Value>) -> StoreResult<Vec<T>> {
    documents.into_iter().map(from_document).collect()
}

/// Genera un id nuevo de documento
pub fn new_document_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}
