use axum::{extract::State, response::Json, routing::get, Router};
use serde_json::{json, Value};

use crate::state::AppState;

pub fn create_health_router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "conectacare-backend",
        "environment": state.config.environment,
        "store": state.store.name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}
