use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::controllers::created;
use crate::dto::admin_dto::{AdminCreateUserRequest, StatisticsResponse};
use crate::models::{AuthContext, UserProfile};
use crate::services::admin_service::csv_filename;
use crate::services::{AdminService, UserService};
use crate::state::AppState;
use crate::utils::errors::{AppError, AppResult};

pub struct AdminController {
    service: AdminService,
    users: UserService,
}

impl AdminController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AdminService::new(state.store.clone(), state.identity.clone()),
            users: UserService::new(state.store.clone(), state.identity.clone()),
        }
    }

    pub async fn me(&self, context: &AuthContext) -> AppResult<Json<UserProfile>> {
        Ok(Json(self.users.get(&context.uid).await?))
    }

    pub async fn list_users(&self) -> AppResult<Json<Vec<UserProfile>>> {
        Ok(Json(self.service.list_users().await?))
    }

    pub async fn create_user(&self, request: AdminCreateUserRequest) -> AppResult<Response> {
        Ok(created(self.service.create_user(request).await?))
    }

    pub async fn delete_user(&self, uid: &str) -> AppResult<StatusCode> {
        self.service.delete_user(uid).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    pub async fn statistics(&self) -> AppResult<Json<StatisticsResponse>> {
        Ok(Json(self.service.statistics().await?))
    }

    /// Descarga del informe como fichero adjunto
    pub async fn download_csv(&self) -> AppResult<Response> {
        let bytes = self.service.export_csv().await?;
        let disposition = format!("attachment; filename=\"{}\"", csv_filename(Utc::now()));
        let disposition = HeaderValue::from_str(&disposition)
            .map_err(|e| AppError::Internal(format!("Cabecera inválida: {}", e)))?;

        Ok((
            [
                (
                    header::CONTENT_TYPE,
                    HeaderValue::from_static("text/csv; charset=UTF-8"),
                ),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            bytes,
        )
            .into_response())
    }
}
