//! Servicio de solicitudes
//!
//! Un trabajador solicita un anuncio; el cliente dueño del anuncio cambia el
//! estado de la solicitud y la marca como completada cuando termina el
//! trabajo.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde_json::{json, Map, Value};
use tracing::{debug, info, warn};

use crate::database::{
    from_documents, new_document_id, to_document, DocumentStore, COLECCION_ANUNCIOS,
    COLECCION_EVALUACIONES, COLECCION_SOLICITUDES,
};
use crate::dto::solicitud_dto::{ApplicationWithWorker, CreateApplicationRequest};
use crate::models::{Ad, Application, ApplicationStatus, AuthContext, Role, UserProfile};
use crate::repositories::UserRepository;
use crate::services::anuncio_service::ANUNCIO_NO_ENCONTRADO;
use crate::services::{ensure_role, load_document};
use crate::utils::errors::{AppError, AppResult};

pub const SOLICITUD_NO_ENCONTRADA: &str = "Solicitud no encontrada";

#[derive(Clone)]
pub struct ApplicationService {
    store: Arc<dyn DocumentStore>,
    users: UserRepository,
}

impl ApplicationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            store,
        }
    }

    /// El trabajador que llama solicita el anuncio indicado
    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateApplicationRequest,
    ) -> AppResult<Application> {
        ensure_role(context, Role::Worker, "Solo los trabajadores pueden enviar solicitudes")?;

        let ad: Ad = load_document(
            self.store.as_ref(),
            COLECCION_ANUNCIOS,
            &request.anuncio_id,
            ANUNCIO_NO_ENCONTRADO,
        )
        .await?;

        let application = Application {
            id: new_document_id(),
            anuncio_id: ad.id,
            trabajador_id: context.uid.clone(),
            cliente_id: Some(ad.cliente_id),
            estado: ApplicationStatus::Pendiente,
            completado: false,
            fecha_solicitud: Utc::now(),
        };

        self.store
            .put(COLECCION_SOLICITUDES, &application.id, to_document(&application)?)
            .await?;
        info!(
            "📝 Solicitud {} de {} para el anuncio {}",
            application.id, application.trabajador_id, application.anuncio_id
        );
        Ok(application)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Application> {
        load_document(self.store.as_ref(), COLECCION_SOLICITUDES, id, SOLICITUD_NO_ENCONTRADA).await
    }

    pub async fn find_by_ad(&self, anuncio_id: &str) -> AppResult<Vec<Application>> {
        self.query("anuncioId", anuncio_id).await
    }

    pub async fn find_by_worker(&self, trabajador_id: &str) -> AppResult<Vec<Application>> {
        self.query("trabajadorId", trabajador_id).await
    }

    /// Solicitudes enviadas por el trabajador que llama
    pub async fn find_mine(&self, context: &AuthContext) -> AppResult<Vec<Application>> {
        self.find_by_worker(&context.uid).await
    }

    /// Cambia el estado. Cualquier transición es válida; solo el cliente de
    /// la solicitud puede hacerlo.
    pub async fn update_status(
        &self,
        context: &AuthContext,
        id: &str,
        estado: ApplicationStatus,
    ) -> AppResult<Application> {
        let application = self.find_owned_by_client(context, id).await?;

        let mut fields = Map::new();
        fields.insert("estado".to_string(), to_document(&estado)?);
        self.store
            .update_fields(COLECCION_SOLICITUDES, id, fields)
            .await?;

        info!("🔄 Solicitud {} pasa a {:?}", id, estado);
        Ok(Application { estado, ..application })
    }

    /// Marca el trabajo como terminado, requisito para poder evaluarlo
    pub async fn mark_completed(&self, context: &AuthContext, id: &str) -> AppResult<Application> {
        let application = self.find_owned_by_client(context, id).await?;

        let mut fields = Map::new();
        fields.insert("completado".to_string(), Value::Bool(true));
        self.store
            .update_fields(COLECCION_SOLICITUDES, id, fields)
            .await?;

        info!("✅ Solicitud {} completada", id);
        Ok(Application {
            completado: true,
            ..application
        })
    }

    /// Solicitudes recibidas en los anuncios de quien llama que todavía no
    /// tienen evaluación, con los datos de cada trabajador.
    pub async fn find_for_client(&self, context: &AuthContext) -> AppResult<Vec<ApplicationWithWorker>> {
        let ad_ids: Vec<Value> = self
            .store
            .query_equal(COLECCION_ANUNCIOS, "clienteId", &json!(context.uid))
            .await?
            .into_iter()
            .filter_map(|ad| ad.get("id").cloned())
            .collect();
        if ad_ids.is_empty() {
            return Ok(Vec::new());
        }

        let applications: Vec<Application> = from_documents(
            self.store
                .query_in(COLECCION_SOLICITUDES, "anuncioId", &ad_ids)
                .await?,
        )?;
        if applications.is_empty() {
            return Ok(Vec::new());
        }

        let application_ids: Vec<Value> = applications.iter().map(|a| json!(a.id)).collect();
        let evaluated: HashSet<String> = self
            .store
            .query_in(COLECCION_EVALUACIONES, "solicitudId", &application_ids)
            .await?
            .into_iter()
            .filter_map(|e| e.get("solicitudId").and_then(Value::as_str).map(str::to_string))
            .collect();

        let pending: Vec<Application> = applications
            .into_iter()
            .filter(|a| !evaluated.contains(&a.id))
            .collect();

        let workers = self.load_workers(&pending).await;
        debug!(
            "📋 {} solicitudes sin evaluar para el cliente {}",
            pending.len(),
            context.uid
        );

        Ok(pending
            .into_iter()
            .map(|application| {
                let worker = workers.get(&application.trabajador_id).and_then(Option::as_ref);
                ApplicationWithWorker::from_parts(application, worker)
            })
            .collect())
    }

    /// Un fallo al leer un trabajador deja su hueco vacío; no tumba la vista
    async fn load_workers(
        &self,
        applications: &[Application],
    ) -> HashMap<String, Option<UserProfile>> {
        let ids: HashSet<&str> = applications.iter().map(|a| a.trabajador_id.as_str()).collect();
        let lookups = ids.into_iter().map(|id| async move {
            let profile = match self.users.find_by_id(id).await {
                Ok(profile) => profile,
                Err(e) => {
                    warn!("⚠️ No se pudo cargar el trabajador {}: {}", id, e);
                    None
                }
            };
            (id.to_string(), profile)
        });
        join_all(lookups).await.into_iter().collect()
    }

    async fn find_owned_by_client(&self, context: &AuthContext, id: &str) -> AppResult<Application> {
        let application = self.find_by_id(id).await?;
        match application.cliente_id.as_deref() {
            Some(cliente_id) if context.is(cliente_id) => Ok(application),
            Some(_) => Err(AppError::Forbidden("No autorizado".to_string())),
            None => Err(AppError::BadRequest(
                "Solicitud no tiene cliente asociado".to_string(),
            )),
        }
    }

    async fn query(&self, field: &str, value: &str) -> AppResult<Vec<Application>> {
        let documents = self
            .store
            .query_equal(COLECCION_SOLICITUDES, field, &json!(value))
            .await?;
        Ok(from_documents(documents)?)
    }
}
