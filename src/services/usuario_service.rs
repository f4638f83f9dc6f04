//! Servicio de usuarios
//!
//! Registro de perfiles, consulta, perfil propio (cuenta como inicio de
//! sesión) y actualización parcial con restricción de campos por rol.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::info;

use crate::clients::IdentityProvider;
use crate::database::{from_document, to_document, DocumentStore};
use crate::models::user::{campos_editables_del_rol, CAMPOS_COMUNES_EDITABLES};
use crate::models::{AuthContext, StatisticsEvent, UserProfile};
use crate::repositories::UserRepository;
use crate::services::StatisticsService;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::BestEffort;

pub const USUARIO_NO_ENCONTRADO: &str = "Usuario no encontrado";

#[derive(Clone)]
pub struct UserService {
    users: UserRepository,
    statistics: StatisticsService,
    identity: Arc<dyn IdentityProvider>,
}

impl UserService {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            statistics: StatisticsService::new(store),
            identity,
        }
    }

    /// Guarda el perfil de un UID nuevo y registra el evento de registro
    pub async fn register(&self, uid: &str, profile: UserProfile) -> AppResult<BestEffort<UserProfile>> {
        self.users.create(uid, &profile).await?;
        info!("✅ Usuario registrado: {} como {}", uid, profile.role());

        let status = self
            .statistics
            .record_event(&profile, StatisticsEvent::Registration)
            .await;
        Ok(BestEffort::with_status(profile, status))
    }

    pub async fn get(&self, uid: &str) -> AppResult<UserProfile> {
        self.users
            .find_by_id(uid)
            .await?
            .ok_or_else(|| AppError::NotFound(USUARIO_NO_ENCONTRADO.to_string()))
    }

    /// Perfil de quien llama; cuenta como inicio de sesión
    pub async fn me(&self, context: &AuthContext) -> AppResult<BestEffort<UserProfile>> {
        let profile = self.get(&context.uid).await?;
        let status = self
            .statistics
            .record_event(&profile, StatisticsEvent::Login)
            .await;
        Ok(BestEffort::with_status(profile, status))
    }

    /// Actualización parcial del propio perfil.
    ///
    /// Solo se aceptan los campos comunes y los del rol de quien llama; el
    /// resultado de la mezcla tiene que seguir siendo un perfil válido.
    pub async fn update(
        &self,
        context: &AuthContext,
        uid: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserProfile> {
        if !context.is(uid) {
            return Err(AppError::Forbidden("No autorizado".to_string()));
        }

        let current = self.get(uid).await?;
        let role_fields = campos_editables_del_rol(current.role());

        if let Some(field) = fields.keys().find(|key| {
            !CAMPOS_COMUNES_EDITABLES.contains(&key.as_str()) && !role_fields.contains(&key.as_str())
        }) {
            return Err(AppError::BadRequest(format!(
                "El campo '{}' no se puede modificar",
                field
            )));
        }

        let mut merged = to_document(&current)?;
        if let Value::Object(document) = &mut merged {
            document.extend(fields.clone());
        }
        if from_document::<UserProfile>(merged).is_err() {
            return Err(AppError::BadRequest(
                "Los datos del perfil no son válidos".to_string(),
            ));
        }

        let updated = self.users.update_fields(uid, fields).await?;
        info!("✏️ Perfil actualizado: {}", uid);
        Ok(updated)
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<bool> {
        Ok(self.identity.email_exists(email).await?)
    }
}
