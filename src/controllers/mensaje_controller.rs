use axum::{response::Response, Json};

use crate::controllers::created;
use crate::dto::mensaje_dto::{ConversationQuery, SendMessageRequest};
use crate::models::{AuthContext, Message};
use crate::services::MessageService;
use crate::state::AppState;
use crate::utils::errors::AppResult;

pub struct MessageController {
    service: MessageService,
}

impl MessageController {
    pub fn new(state: &AppState) -> Self {
        Self {
            service: MessageService::new(state.store.clone()),
        }
    }

    pub async fn send(&self, context: &AuthContext, request: SendMessageRequest) -> AppResult<Response> {
        Ok(created(self.service.send(context, request).await?))
    }

    pub async fn conversation(
        &self,
        context: &AuthContext,
        query: ConversationQuery,
    ) -> AppResult<Json<Vec<Message>>> {
        Ok(Json(
            self.service
                .conversation(context, &query.usuario1_id, &query.usuario2_id)
                .await?,
        ))
    }
}
