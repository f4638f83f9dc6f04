use axum::{response::Response, Json};

use crate::controllers::created;
use crate::dto::evaluacion_dto::{CreateEvaluationRequest, EvaluationSummary, RatingAverage};
use crate::models::{AuthContext, Evaluation};
use crate::services::EvaluationService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct EvaluationController {
    service: EvaluationService,
}

impl EvaluationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: EvaluationService::new(state.store.clone()),
        }
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateEvaluationRequest,
    ) -> AppResult<Response> {
        Ok(created(self.service.create(context, request).await?))
    }

    pub async fn get(&self, id: &str) -> AppResult<Json<Evaluation>> {
        Ok(Json(self.service.find_by_id(id).await?))
    }

    pub async fn list_by_worker(&self, trabajador_id: &str) -> AppResult<Json<Vec<EvaluationSummary>>> {
        Ok(Json(self.service.find_by_worker(trabajador_id).await?))
    }

    /// Evaluaciones recibidas por quien llama
    pub async fn list_mine(&self, context: &AuthContext) -> AppResult<Json<Vec<EvaluationSummary>>> {
        Ok(Json(self.service.find_by_worker(&context.uid).await?))
    }

    pub async fn is_evaluated(&self, solicitud_id: &str) -> AppResult<Json<bool>> {
        Ok(Json(self.service.is_evaluated(solicitud_id).await?))
    }

    pub async fn average(&self) -> AppResult<Json<RatingAverage>> {
        Ok(Json(self.service.average().await?))
    }
}
