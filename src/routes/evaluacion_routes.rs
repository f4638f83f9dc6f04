use axum::{
    extract::{Path, State},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::evaluacion_controller::EvaluationController;
use crate::dto::evaluacion_dto::{CreateEvaluationRequest, EvaluationSummary, RatingAverage};
use crate::models::{AuthContext, Evaluation};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_evaluacion_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_evaluation))
        .route("/mias", get(list_mine))
        .route("/media", get(average))
        .route("/trabajador/:trabajador_id", get(list_by_worker))
        .route("/evaluada/:solicitud_id", get(is_evaluated))
        .route("/:id", get(get_evaluation))
}

async fn create_evaluation(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<CreateEvaluationRequest>,
) -> Result<Response, AppError> {
    EvaluationController::new(&state).create(&context, request).await
}

async fn get_evaluation(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Evaluation>, AppError> {
    EvaluationController::new(&state).get(&id).await
}

async fn list_by_worker(
    State(state): State<AppState>,
    Path(trabajador_id): Path<String>,
) -> Result<Json<Vec<EvaluationSummary>>, AppError> {
    EvaluationController::new(&state)
        .list_by_worker(&trabajador_id)
        .await
}

async fn list_mine(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
) -> Result<Json<Vec<EvaluationSummary>>, AppError> {
    EvaluationController::new(&state).list_mine(&context).await
}

async fn is_evaluated(
    State(state): State<AppState>,
    Path(solicitud_id): Path<String>,
) -> Result<Json<bool>, AppError> {
    EvaluationController::new(&state)
        .is_evaluated(&solicitud_id)
        .await
}

async fn average(State(state): State<AppState>) -> Result<Json<RatingAverage>, AppError> {
    EvaluationController::new(&state).average().await
}
