//! Servicio de administración
//!
//! Gestión de usuarios (alta completa y baja en el proveedor de identidad y
//! en el almacén), estadísticas globales y exportación a CSV.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::clients::{IdentityError, IdentityProvider};
use crate::database::DocumentStore;
use crate::dto::admin_dto::{AdminCreateUserRequest, StatisticsResponse};
use crate::models::{Role, StatisticsEvent, UserProfile};
use crate::repositories::UserRepository;
use crate::services::usuario_service::USUARIO_NO_ENCONTRADO;
use crate::services::{AdService, StatisticsService, UserService};
use crate::utils::errors::{AppError, AppResult};
use crate::utils::BestEffort;

const CABECERA_CSV: [&str; 8] = [
    "ID Usuario",
    "Nombre",
    "Email",
    "Rol",
    "Total Inicios Sesión",
    "Total Registros",
    "Total Anuncios",
    "Anuncios de este Usuario",
];

#[derive(Clone)]
pub struct AdminService {
    users: UserRepository,
    user_service: UserService,
    statistics: StatisticsService,
    ads: AdService,
    identity: Arc<dyn IdentityProvider>,
}

impl AdminService {
    pub fn new(store: Arc<dyn DocumentStore>, identity: Arc<dyn IdentityProvider>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            user_service: UserService::new(store.clone(), identity.clone()),
            statistics: StatisticsService::new(store.clone()),
            ads: AdService::new(store),
            identity,
        }
    }

    pub async fn list_users(&self) -> AppResult<Vec<UserProfile>> {
        self.users.find_all().await
    }

    /// Crea la cuenta en el proveedor de identidad y después el perfil local
    pub async fn create_user(&self, request: AdminCreateUserRequest) -> AppResult<BestEffort<UserProfile>> {
        let uid = self
            .identity
            .create_account(&request.email, &request.password)
            .await?;
        info!("🔑 Cuenta creada por administración: {} ({})", request.email, uid);

        self.user_service.register(&uid, request.to_profile(&uid)).await
    }

    /// Borra la cuenta de acceso y el perfil. 404 si no hay perfil.
    pub async fn delete_user(&self, uid: &str) -> AppResult<()> {
        if self.users.find_by_id(uid).await?.is_none() {
            return Err(AppError::NotFound(USUARIO_NO_ENCONTRADO.to_string()));
        }

        match self.identity.delete_account(uid).await {
            Ok(()) => {}
            Err(IdentityError::AccountNotFound(_)) => {
                warn!("⚠️ La cuenta {} ya no existía en el proveedor de identidad", uid);
            }
            Err(e) => return Err(e.into()),
        }

        self.users.delete(uid).await?;
        info!("🗑️ Usuario {} eliminado", uid);
        Ok(())
    }

    pub async fn statistics(&self) -> AppResult<StatisticsResponse> {
        Ok(StatisticsResponse {
            inicios_sesion: self.statistics.count_events(StatisticsEvent::Login).await?,
            registros: self
                .statistics
                .count_events(StatisticsEvent::Registration)
                .await?,
            total_anuncios: self.ads.count_all().await?,
        })
    }

    /// Informe CSV por usuario (UTF-8 con BOM)
    pub async fn export_csv(&self) -> AppResult<Vec<u8>> {
        let users = self.users.find_all().await?;
        let totals = self.statistics().await?;
        info!("📄 Generando CSV para {} usuarios", users.len());

        let mut writer = csv::Writer::from_writer("\u{feff}".as_bytes().to_vec());
        writer.write_record(CABECERA_CSV).map_err(csv_error)?;

        for user in &users {
            let user_ads = if user.role() == Role::Client {
                match self.ads.find_by_client(&user.id).await {
                    Ok(ads) => ads.len(),
                    Err(e) => {
                        warn!("⚠️ No se pudieron contar los anuncios de {}: {}. Usando 0.", user.id, e);
                        0
                    }
                }
            } else {
                0
            };

            writer
                .write_record([
                    user.id.clone(),
                    user.nombre.clone(),
                    user.email.clone(),
                    user.role().to_string(),
                    totals.inicios_sesion.to_string(),
                    totals.registros.to_string(),
                    totals.total_anuncios.to_string(),
                    user_ads.to_string(),
                ])
                .map_err(csv_error)?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Error al generar el archivo CSV: {}", e)))
    }
}

/// Nombre del fichero de exportación para un instante dado
pub fn csv_filename(now: DateTime<Utc>) -> String {
    format!("estadisticas_usuarios_{}.csv", now.format("%Y%m%d_%H%M%S"))
}

fn csv_error(e: csv::Error) -> AppError {
    AppError::Internal(format!("Error de escritura al generar el archivo CSV: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::VerifiedIdentity;
    use crate::dto::anuncio_dto::CreateAdRequest;
    use crate::services::test_support::{context, seed_profile, store};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use tokio::sync::Mutex;

    #[derive(Default)]
    struct RecordingIdentity {
        deleted: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl IdentityProvider for RecordingIdentity {
        async fn verify_token(&self, _token: &str) -> Result<VerifiedIdentity, IdentityError> {
            Err(IdentityError::InvalidToken("no usado".into()))
        }
        async fn create_account(&self, email: &str, _password: &str) -> Result<String, IdentityError> {
            if email == "repetido@example.com" {
                return Err(IdentityError::EmailAlreadyExists(email.to_string()));
            }
            Ok(format!("uid-{}", email))
        }
        async fn delete_account(&self, uid: &str) -> Result<(), IdentityError> {
            self.deleted.lock().await.push(uid.to_string());
            Ok(())
        }
        async fn email_exists(&self, _email: &str) -> Result<bool, IdentityError> {
            Ok(false)
        }
    }

    fn new_user(email: &str, rol: Role) -> AdminCreateUserRequest {
        serde_json::from_value(serde_json::json!({
            "email": email,
            "password": "secreto123",
            "nombre": "Nuevo",
            "rol": rol,
            "habilidades": ["jardinería"],
            "direccion": "Calle Sol 2"
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_user_creates_account_then_profile() {
        let store = store();
        let service = AdminService::new(store.clone(), Arc::new(RecordingIdentity::default()));

        let outcome = service
            .create_user(new_user("w@example.com", Role::Worker))
            .await
            .unwrap();

        assert_eq!(outcome.value.id, "uid-w@example.com");
        assert_eq!(outcome.value.role(), Role::Worker);
        assert_eq!(service.list_users().await.unwrap().len(), 1);
        assert_eq!(service.statistics().await.unwrap().registros, 1);
    }

    #[tokio::test]
    async fn test_create_user_with_taken_email_is_conflict() {
        let service = AdminService::new(store(), Arc::new(RecordingIdentity::default()));
        let error = service
            .create_user(new_user("repetido@example.com", Role::Client))
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_delete_user_removes_account_and_profile() {
        let store = store();
        seed_profile(&store, "c1", Role::Client).await;
        let identity = Arc::new(RecordingIdentity::default());
        let service = AdminService::new(store.clone(), identity.clone());

        service.delete_user("c1").await.unwrap();

        assert_eq!(*identity.deleted.lock().await, vec!["c1".to_string()]);
        assert!(service.list_users().await.unwrap().is_empty());
        let error = service.delete_user("c1").await.unwrap_err();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_csv_has_bom_header_and_per_client_ads() {
        let store = store();
        seed_profile(&store, "c1", Role::Client).await;
        seed_profile(&store, "w1", Role::Worker).await;
        AdService::new(store.clone())
            .create(
                &context("c1", Role::Client),
                CreateAdRequest {
                    hogar: vec![],
                    personal: vec![],
                    acompanamiento: vec![],
                    salud: vec!["medicación".into()],
                    comentarios: None,
                },
            )
            .await
            .unwrap();
        let service = AdminService::new(store, Arc::new(RecordingIdentity::default()));

        let bytes = service.export_csv().await.unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next().unwrap(),
            "\u{feff}ID Usuario,Nombre,Email,Rol,Total Inicios Sesión,Total Registros,Total Anuncios,Anuncios de este Usuario"
        );
        let rows: Vec<&str> = lines.collect();
        assert_eq!(rows.len(), 2);
        assert!(rows.contains(&"c1,Nombre c1,c1@example.com,CLIENTE,0,0,1,1"));
        assert!(rows.contains(&"w1,Nombre w1,w1@example.com,TRABAJADOR,0,0,1,0"));
    }

    #[test]
    fn test_csv_filename_uses_timestamp() {
        let now = Utc.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(csv_filename(now), "estadisticas_usuarios_20240309_070501.csv");
    }
}
