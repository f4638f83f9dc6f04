use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Response,
    routing::{get, post},
    Extension, Json, Router,
};

use crate::controllers::mensaje_controller::MessageController;
use crate::dto::mensaje_dto::{ConversationQuery, SendMessageRequest};
use crate::models::{AuthContext, Message};
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::ValidatedJson;

pub fn create_mensaje_router() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/conversacion", get(get_conversation))
}

async fn send_message(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> Result<Response, AppError> {
    MessageController::new(&state).send(&context, request).await
}

async fn get_conversation(
    State(state): State<AppState>,
    Extension(context): Extension<AuthContext>,
    query: Result<Query<ConversationQuery>, QueryRejection>,
) -> Result<Json<Vec<Message>>, AppError> {
    let Query(query) = query.map_err(|_| {
        AppError::BadRequest("Los parámetros 'usuario1Id' y 'usuario2Id' son obligatorios".to_string())
    })?;
    MessageController::new(&state)
        .conversation(&context, query)
        .await
}
