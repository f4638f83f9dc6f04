use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::usuario_controller::UserController;
use crate::dto::usuario_dto::{
    ClientRegistrationRequest, EmailExistsQuery, EmailExistsResponse, ProfileUpdateRequest,
    WorkerRegistrationRequest,
};
use crate::models::{AuthContext, UserProfile};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_usuario_router() -> Router<AppState> {
    Router::new()
        .route("/cliente", post(register_client))
        .route("/trabajador", post(register_worker))
        .route("/yo", get(get_me))
        .route("/email-existe", get(email_exists))
        .route("/:id", get(get_user).put(update_user))
}

async fn register_client(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<ClientRegistrationRequest>,
) -> Result<Response, AppError> {
    UserController::new(&state).register_client(&context, request).await
}

async fn register_worker(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<WorkerRegistrationRequest>,
) -> Result<Response, AppError> {
    UserController::new(&state).register_worker(&context, request).await
}

async fn get_me(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Response, AppError> {
    UserController::new(&state).me(&context).await
}

async fn email_exists(
    State(state): State<AppState>,
    query: Result<Query<EmailExistsQuery>, QueryRejection>,
) -> Result<Json<EmailExistsResponse>, AppError> {
    let Query(query) =
        query.map_err(|_| AppError::BadRequest("El parámetro 'email' es obligatorio".to_string()))?;
    UserController::new(&state).email_exists(&query.email).await
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<UserProfile>, AppError> {
    UserController::new(&state).get(&id).await
}

async fn update_user(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<ProfileUpdateRequest>,
) -> Result<Json<UserProfile>, AppError> {
    UserController::new(&state).update(&context, &id, request).await
}
