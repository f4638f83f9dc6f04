use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::Response,
    routing::{delete, get, post},
    Extension, Json, Router,
};

use crate::controllers::admin_controller::AdminController;
use crate::dto::admin_dto::{AdminCreateUserRequest, StatisticsResponse};
use crate::middleware::admin_only_middleware;
use crate::models::{AuthContext, UserProfile};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_admin_router() -> Router<AppState> {
    Router::new()
        .route("/yo", get(get_me))
        .route("/usuarios", get(list_users))
        .route("/crear-usuario", post(create_user))
        .route("/estadisticas", get(get_statistics))
        .route("/estadisticas/descargar-csv", get(download_csv))
        .route("/:id", delete(delete_user))
        .route_layer(middleware::from_fn(admin_only_middleware))
}

async fn get_me(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<UserProfile>, AppError> {
    AdminController::new(&state).me(&context).await
}

async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<UserProfile>>, AppError> {
    AdminController::new(&state).list_users().await
}

async fn create_user(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AdminCreateUserRequest>,
) -> Result<Response, AppError> {
    AdminController::new(&state).create_user(request).await
}

async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    AdminController::new(&state).delete_user(&id).await
}

async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<StatisticsResponse>, AppError> {
    AdminController::new(&state).statistics().await
}

async fn download_csv(State(state): State<AppState>) -> Result<Response, AppError> {
    AdminController::new(&state).download_csv().await
}
