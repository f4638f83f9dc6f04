//! Repositorio de perfiles de usuario
//!
//! CRUD por UID sobre la colección `usuarios`. No aplica restricciones de
//! campos por rol; eso lo hace el servicio de usuarios.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::debug;

use crate::database::{
    from_document, from_documents, to_document, DocumentStore, COLECCION_USUARIOS,
};
use crate::models::UserProfile;
use crate::utils::errors::{AppError, AppResult};

/// Mensaje de conflicto cuando el UID ya tiene perfil
pub const PERFIL_YA_EXISTE: &str =
    "El perfil para este usuario (UID) ya existe en nuestros sistemas.";

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<dyn DocumentStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Crea el perfil de `uid`. El id del perfil debe ser el UID verificado
    /// y no puede existir otro perfil con ese UID.
    pub async fn create(&self, uid: &str, profile: &UserProfile) -> AppResult<()> {
        if profile.id != uid {
            return Err(AppError::Forbidden(
                "El UID del perfil no coincide con el del token".to_string(),
            ));
        }

        let created = self
            .store
            .create(COLECCION_USUARIOS, uid, to_document(profile)?)
            .await?;
        if !created {
            return Err(AppError::Conflict(PERFIL_YA_EXISTE.to_string()));
        }

        debug!("👤 Perfil creado: {} ({})", uid, profile.role());
        Ok(())
    }

    /// Mezcla los campos indicados y devuelve el perfil resultante
    pub async fn update_fields(
        &self,
        uid: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserProfile> {
        self.store
            .update_fields(COLECCION_USUARIOS, uid, fields)
            .await?;

        self.find_by_id(uid)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuario no encontrado".to_string()))
    }

    pub async fn find_by_id(&self, uid: &str) -> AppResult<Option<UserProfile>> {
        match self.store.get(COLECCION_USUARIOS, uid).await? {
            Some(document) => Ok(Some(from_document(document)?)),
            None => Ok(None),
        }
    }

    pub async fn find_all(&self) -> AppResult<Vec<UserProfile>> {
        let documents = self.store.list_all(COLECCION_USUARIOS).await?;
        Ok(from_documents(documents)?)
    }

    pub async fn delete(&self, uid: &str) -> AppResult<()> {
        self.store.delete(COLECCION_USUARIOS, uid).await?;
        Ok(())
    }
}
