use axum::{http::StatusCode, Json};

use crate::dto::anuncio_dto::CreateAdRequest;
use crate::models::{Ad, AuthContext};
use crate::services::AdService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct AdController {
    service: AdService,
}

impl AdController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: AdService::new(state.store.clone()),
        }
    }

    pub async fn create(
        &self,
        context: &AuthContext,
        request: CreateAdRequest,
    ) -> AppResult<(StatusCode, Json<Ad>)> {
        let ad = self.service.create(context, request).await?;
        Ok((StatusCode::CREATED, Json(ad)))
    }

    pub async fn get(&self, id: &str) -> AppResult<Json<Ad>> {
        Ok(Json(self.service.find_by_id(id).await?))
    }

    pub async fn list(&self) -> AppResult<Json<Vec<Ad>>> {
        Ok(Json(self.service.find_all().await?))
    }

    pub async fn list_by_client(&self, cliente_id: &str) -> AppResult<Json<Vec<Ad>>> {
        Ok(Json(self.service.find_by_client(cliente_id).await?))
    }
}
