use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};

use crate::controllers::anuncio_controller::AdController;
use crate::dto::anuncio_dto::CreateAdRequest;
use crate::models::{Ad, AuthContext};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_anuncio_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_ads).post(create_ad))
        .route("/:id", get(get_ad))
        .route("/cliente/:cliente_id", get(list_client_ads))
}

async fn create_ad(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<CreateAdRequest>,
) -> Result<(StatusCode, Json<Ad>), AppError> {
    AdController::new(&state).create(&context, request).await
}

async fn list_ads(State(state): State<AppState>) -> Result<Json<Vec<Ad>>, AppError> {
    AdController::new(&state).list().await
}

async fn get_ad(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Ad>, AppError> {
    AdController::new(&state).get(&id).await
}

async fn list_client_ads(
    State(state): State<AppState>,
    Path(cliente_id): Path<String>,
) -> Result<Json<Vec<Ad>>, AppError> {
    AdController::new(&state).list_by_client(&cliente_id).await
}
