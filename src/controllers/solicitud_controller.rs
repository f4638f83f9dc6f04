use axum::{http::StatusCode, Json};

use crate::dto::solicitud_dto::{ApplicationWithWorker, CreateApplicationRequest, UpdateStatusRequest};
use crate::models::{Application, AuthContext};
use crate::services::ApplicationService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct ApplicationController {
    service: ApplicationService,
}

impl ApplicationController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: ApplicationService::new(state.store.clone()),
        }
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateApplicationRequest,
    ) -> AppResult<(StatusCode, Json<Application>)> {
        let application = self.service.create(context, request).await?;
        Ok((StatusCode::CREATED, Json(application)))
    }

    pub async fn get(&self, id: &str) -> AppResult<Json<Application>> {
        Ok(Json(self.service.find_by_id(id).await?))
    }

    pub async fn update_status(
        &self,
        context: &AuthContext,
        id: &str,
        request: UpdateStatusRequest,
    ) -> AppResult<Json<Application>> {
        Ok(Json(
            self.service
                .update_status(context, id, request.estado)
                .await?,
        ))
    }

    pub async fn complete(&self, context: &AuthContext, id: &str) -> AppResult<Json<Application>> {
        Ok(Json(self.service.mark_completed(context, id).await?))
    }

    pub async fn list_for_client(
        &self,
        context: &AuthContext,
    ) -> AppResult<Json<Vec<ApplicationWithWorker>>> {
        Ok(Json(self.service.find_for_client(context).await?))
    }

    pub async fn list_mine(&self, context: &AuthContext) -> AppResult<Json<Vec<Application>>> {
        Ok(Json(self.service.find_mine(context).await?))
    }

    pub async fn list_by_ad(&self, anuncio_id: &str) -> AppResult<Json<Vec<Application>>> {
        Ok(Json(self.service.find_by_ad(anuncio_id).await?))
    }

    pub async fn list_by_worker(&self, trabajador_id: &str) -> AppResult<Json<Vec<Application>>> {
        Ok(Json(self.service.find_by_worker(trabajador_id).await?))
    }
}
