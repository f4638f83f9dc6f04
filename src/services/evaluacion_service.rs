//! Servicio de evaluaciones
//!
//! Una solicitud completada admite una única evaluación de su cliente. El
//! id de la evaluación es el de la solicitud y se escribe con una inserción
//! exclusiva, así que dos peticiones concurrentes no pueden duplicarla.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use futures::future::join_all;
use serde_json::{json, Map, Value};
use tracing::{info, warn};

use crate::database::{
    from_documents, to_document, DocumentStore, COLECCION_CHATS, COLECCION_EVALUACIONES,
    COLECCION_SOLICITUDES,
};
use crate::dto::evaluacion_dto::{CreateEvaluationRequest, EvaluationSummary, RatingAverage};
use crate::models::{conversation_id, Application, AuthContext, Evaluation};
use crate::repositories::UserRepository;
use crate::services::load_document;
use crate::services::solicitud_service::SOLICITUD_NO_ENCONTRADA;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::{BestEffort, SideEffectStatus};

pub const EVALUACION_NO_ENCONTRADA: &str = "Evaluación no encontrada";

#[derive(Clone)]
pub struct EvaluationService {
    store: Arc<dyn DocumentStore>,
    users: UserRepository,
}

impl EvaluationService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            store,
        }
    }

    /// Evalúa una solicitud completada. Después marca el chat entre cliente
    /// y trabajador como evaluado; ese paso no invalida la evaluación.
    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateEvaluationRequest,
    ) -> AppResult<BestEffort<Evaluation>> {
        let application: Application = load_document(
            self.store.as_ref(),
            COLECCION_SOLICITUDES,
            &request.solicitud_id,
            SOLICITUD_NO_ENCONTRADA,
        )
        .await?;

        let cliente_id = match application.cliente_id.as_deref() {
            Some(cliente_id) if context.is(cliente_id) => cliente_id.to_string(),
            _ => return Err(AppError::Forbidden("No autorizado".to_string())),
        };
        if !application.completado {
            return Err(AppError::BadRequest(
                "El trabajo debe estar completado primero".to_string(),
            ));
        }

        let evaluation = Evaluation {
            id: application.id.clone(),
            solicitud_id: application.id.clone(),
            trabajador_id: application.trabajador_id.clone(),
            cliente_id,
            estrellas: request.estrellas,
            comentario: request.comentario,
            fecha_evaluacion: Utc::now(),
        };

        let created = self
            .store
            .create(COLECCION_EVALUACIONES, &evaluation.id, to_document(&evaluation)?)
            .await?;
        if !created {
            return Err(AppError::Conflict(
                "Esta solicitud ya ha sido evaluada".to_string(),
            ));
        }
        info!(
            "⭐ Evaluación de {} estrellas para {} (solicitud {})",
            evaluation.estrellas, evaluation.trabajador_id, evaluation.solicitud_id
        );

        let status = self.tag_chat_as_evaluated(&evaluation).await;
        Ok(BestEffort::with_status(evaluation, status))
    }

    async fn tag_chat_as_evaluated(&self, evaluation: &Evaluation) -> SideEffectStatus {
        let chat_id = conversation_id(&evaluation.cliente_id, &evaluation.trabajador_id);
        let mut fields = Map::new();
        fields.insert("evaluadoPorCliente".to_string(), Value::Bool(true));
        fields.insert(
            "solicitudEvaluadaId".to_string(),
            Value::String(evaluation.solicitud_id.clone()),
        );

        match self.store.update_fields(COLECCION_CHATS, &chat_id, fields).await {
            Ok(()) => SideEffectStatus::Completed,
            Err(e) => SideEffectStatus::failed("marcar_chat_evaluado", e),
        }
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Evaluation> {
        load_document(self.store.as_ref(), COLECCION_EVALUACIONES, id, EVALUACION_NO_ENCONTRADA).await
    }

    pub async fn is_evaluated(&self, solicitud_id: &str) -> AppResult<bool> {
        let found = self
            .store
            .query_equal(COLECCION_EVALUACIONES, "solicitudId", &json!(solicitud_id))
            .await?;
        Ok(!found.is_empty())
    }

    /// Evaluaciones de un trabajador con el nombre del cliente que las hizo
    pub async fn find_by_worker(&self, trabajador_id: &str) -> AppResult<Vec<EvaluationSummary>> {
        let evaluations: Vec<Evaluation> = from_documents(
            self.store
                .query_equal(COLECCION_EVALUACIONES, "trabajadorId", &json!(trabajador_id))
                .await?,
        )?;

        let mut client_ids: Vec<&str> = evaluations.iter().map(|e| e.cliente_id.as_str()).collect();
        client_ids.sort_unstable();
        client_ids.dedup();

        let names: HashMap<String, Option<String>> = join_all(client_ids.into_iter().map(|id| async move {
            let name = match self.users.find_by_id(id).await {
                Ok(profile) => profile.map(|p| p.nombre),
                Err(e) => {
                    warn!("⚠️ No se pudo cargar el cliente {}: {}", id, e);
                    None
                }
            };
            (id.to_string(), name)
        }))
        .await
        .into_iter()
        .collect();

        Ok(evaluations
            .into_iter()
            .map(|evaluation| {
                let name = names.get(&evaluation.cliente_id).cloned().flatten();
                EvaluationSummary::new(evaluation, name)
            })
            .collect())
    }

    /// Media de estrellas de todas las evaluaciones
    pub async fn average(&self) -> AppResult<RatingAverage> {
        let evaluations: Vec<Evaluation> =
            from_documents(self.store.list_all(COLECCION_EVALUACIONES).await?)?;
        Ok(RatingAverage::from_evaluations(&evaluations))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::InMemoryDocumentStore;
    use crate::dto::evaluacion_dto::CLIENTE_DESCONOCIDO;
    use crate::models::{ApplicationStatus, Role};
    use crate::services::test_support::{context, seed_profile, store};
    use axum::http::StatusCode;

    async fn seed_application(store: &InMemoryDocumentStore, id: &str, completado: bool) {
        let application = Application {
            id: id.to_string(),
            anuncio_id: "a1".into(),
            trabajador_id: "w1".into(),
            cliente_id: Some("c1".into()),
            estado: ApplicationStatus::Aceptada,
            completado,
            fecha_solicitud: Utc::now(),
        };
        store
            .put(COLECCION_SOLICITUDES, id, to_document(&application).unwrap())
            .await
            .unwrap();
    }

    fn evaluate(solicitud_id: &str, estrellas: u8) -> CreateEvaluationRequest {
        CreateEvaluationRequest {
            solicitud_id: solicitud_id.to_string(),
            estrellas,
            comentario: Some("Muy puntual".into()),
        }
    }

    #[tokio::test]
    async fn test_evaluation_requires_existing_application() {
        let service = EvaluationService::new(store());
        let error = service
            .create(&context("c1", Role::Client), evaluate("s-x", 5))
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_evaluation_checks_caller_before_completion() {
        let store = store();
        seed_application(&store, "s1", false).await;
        let service = EvaluationService::new(store.clone());

        let error = service
            .create(&context("otro", Role::Client), evaluate("s1", 5))
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), StatusCode::FORBIDDEN);

        let error = service
            .create(&context("c1", Role::Client), evaluate("s1", 5))
            .await
            .unwrap_err();
        assert_eq!(error.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(store.count(COLECCION_EVALUACIONES).await, 0);
    }

    #[tokio::test]
    async fn test_second_evaluation_is_conflict() {
        let store = store();
        seed_application(&store, "s1", true).await;
        let service = EvaluationService::new(store.clone());
        let caller = context("c1", Role::Client);

        service.create(&caller, evaluate("s1", 4)).await.unwrap();
        let error = service.create(&caller, evaluate("s1", 1)).await.unwrap_err();

        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(store.count(COLECCION_EVALUACIONES).await, 1);
        assert!(service.is_evaluated("s1").await.unwrap());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_evaluations_only_one_wins() {
        let store = store();
        seed_application(&store, "s1", true).await;
        let service = EvaluationService::new(store.clone());
        let caller = context("c1", Role::Client);

        let (first, second) = tokio::join!(
            service.create(&caller, evaluate("s1", 5)),
            service.create(&caller, evaluate("s1", 1)),
        );

        let results = [first, second];
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        let error = results.iter().find_map(|r| r.as_ref().err()).unwrap();
        assert_eq!(error.status_code(), StatusCode::CONFLICT);
        assert_eq!(store.count(COLECCION_EVALUACIONES).await, 1);
    }

    #[tokio::test]
    async fn test_missing_chat_degrades_but_keeps_evaluation() {
        let store = store();
        seed_application(&store, "s1", true).await;
        let service = EvaluationService::new(store.clone());

        let outcome = service
            .create(&context("c1", Role::Client), evaluate("s1", 5))
            .await
            .unwrap();

        assert!(outcome.is_degraded());
        assert_eq!(service.find_by_id("s1").await.unwrap(), outcome.value);
    }

    #[tokio::test]
    async fn test_existing_chat_is_tagged() {
        let store = store();
        seed_application(&store, "s1", true).await;
        let chat_id = conversation_id("c1", "w1");
        store
            .put(COLECCION_CHATS, &chat_id, json!({ "id": chat_id }))
            .await
            .unwrap();
        let service = EvaluationService::new(store.clone());

        let outcome = service
            .create(&context("c1", Role::Client), evaluate("s1", 5))
            .await
            .unwrap();

        assert!(!outcome.is_degraded());
        let chat = store.get(COLECCION_CHATS, &chat_id).await.unwrap().unwrap();
        assert_eq!(chat["evaluadoPorCliente"], true);
        assert_eq!(chat["solicitudEvaluadaId"], "s1");
    }

    #[tokio::test]
    async fn test_worker_listing_joins_client_name_and_average() {
        let store = store();
        seed_profile(&store, "c1", Role::Client).await;
        seed_application(&store, "s1", true).await;
        seed_application(&store, "s2", true).await;
        let service = EvaluationService::new(store.clone());
        service
            .create(&context("c1", Role::Client), evaluate("s1", 5))
            .await
            .unwrap();
        service
            .create(&context("c1", Role::Client), evaluate("s2", 2))
            .await
            .unwrap();

        let listed = service.find_by_worker("w1").await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(listed.iter().all(|e| e.nombre_cliente == "Nombre c1"));

        // Perfil ilegible: mismo resultado que un cliente borrado
        store
            .put(crate::database::COLECCION_USUARIOS, "c1", json!({ "id": "c1" }))
            .await
            .unwrap();
        let listed = service.find_by_worker("w1").await.unwrap();
        assert!(listed.iter().all(|e| e.nombre_cliente == CLIENTE_DESCONOCIDO));

        store.delete(crate::database::COLECCION_USUARIOS, "c1").await.unwrap();
        let listed = service.find_by_worker("w1").await.unwrap();
        assert!(listed.iter().all(|e| e.nombre_cliente == CLIENTE_DESCONOCIDO));

        let average = service.average().await.unwrap();
        assert_eq!(average.total_valoraciones, 2);
        assert!((average.media_estrellas - 3.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_average_without_evaluations_is_zero() {
        let average = EvaluationService::new(store()).average().await.unwrap();
        assert_eq!(average.total_valoraciones, 0);
        assert_eq!(average.media_estrellas, 0.0);
    }
}
