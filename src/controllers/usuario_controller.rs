use axum::response::Response;
use axum::Json;

use crate::controllers::{created, ok};
use crate::dto::usuario_dto::{
    ClientRegistrationRequest, EmailExistsResponse, ProfileUpdateRequest,
    WorkerRegistrationRequest,
};
use crate::models::{AuthContext, UserProfile};
use crate::services::UserService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct UserController {
    service: UserService,
}

impl UserController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: UserService::new(state.store.clone(), state.identity.clone()),
        }
    }

    pub async fn register_client(
        &self,
        context: &AuthContext,
        request: ClientRegistrationRequest,
    ) -> AppResult<Response> {
        let profile = request.into_profile(&context.uid);
        Ok(created(self.service.register(&context.uid, profile).await?))
    }

    pub async fn register_worker(
        &self,
        context: &AuthContext,
        request: WorkerRegistrationRequest,
    ) -> AppResult<Response> {
        let profile = request.into_profile(&context.uid);
        Ok(created(self.service.register(&context.uid, profile).await?))
    }

    pub async fn get(&self, uid: &str) -> AppResult<Json<UserProfile>> {
        Ok(Json(self.service.get(uid).await?))
    }

    pub async fn me(&self, context: &AuthContext) -> AppResult<Response> {
        Ok(ok(self.service.me(context).await?))
    }

    pub async fn update(
        &self,
        context: &AuthContext,
        uid: &str,
        request: ProfileUpdateRequest,
    ) -> AppResult<Json<UserProfile>> {
        Ok(Json(self.service.update(context, uid, request.fields).await?))
    }

    pub async fn email_exists(&self, email: &str) -> AppResult<Json<EmailExistsResponse>> {
        let existe = self.service.email_exists(email).await?;
        Ok(Json(EmailExistsResponse { existe }))
    }
}
