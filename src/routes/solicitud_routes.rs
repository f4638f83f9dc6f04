use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Extension, Json, Router,
};

use crate::controllers::solicitud_controller::ApplicationController;
use crate::dto::solicitud_dto::{ApplicationWithWorker, CreateApplicationRequest, UpdateStatusRequest};
use crate::models::{Application, AuthContext};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_solicitud_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_application))
        .route("/cliente", get(list_for_client))
        .route("/mias", get(list_mine))
        .route("/anuncio/:anuncio_id", get(list_by_ad))
        .route("/trabajador/:trabajador_id", get(list_by_worker))
        .route("/:id", get(get_application))
        .route("/:id/estado", put(update_status))
        .route("/:id/completar", put(complete))
}

async fn create_application(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<CreateApplicationRequest>,
) -> Result<(StatusCode, Json<Application>), AppError> {
    ApplicationController::new(&state).create(&context, request).await
}

async fn get_application(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    ApplicationController::new(&state).get(&id).await
}

async fn update_status(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
    body: Result<Json<UpdateStatusRequest>, axum::extract::rejection::JsonRejection>,
) -> Result<Json<Application>, AppError> {
    let Json(request) = body.map_err(|_| AppError::BadRequest("Estado no válido".to_string()))?;
    ApplicationController::new(&state)
        .update_status(&context, &id, request)
        .await
}

async fn complete(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    Path(id): Path<String>,
) -> Result<Json<Application>, AppError> {
    ApplicationController::new(&state).complete(&context, &id).await
}

async fn list_for_client(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Vec<ApplicationWithWorker>>, AppError> {
    ApplicationController::new(&state).list_for_client(&context).await
}

async fn list_mine(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Vec<Application>>, AppError> {
    ApplicationController::new(&state).list_mine(&context).await
}

async fn list_by_ad(
    State(state): State<AppState>,
    Path(anuncio_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    ApplicationController::new(&state).list_by_ad(&anuncio_id).await
}

async fn list_by_worker(
    State(state): State<AppState>,
    Path(trabajador_id): Path<String>,
) -> Result<Json<Vec<Application>>, AppError> {
    ApplicationController::new(&state)
        .list_by_worker(&trabajador_id)
        .await
}
