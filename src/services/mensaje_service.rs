use std::sync::Arc;

use chrono::Utc;
use serde_json::{json, Map, Value};
use tracing::info;

use crate::database::{
    from_documents, new_document_id, to_document, DocumentStore, StoreResult, COLECCION_CHATS,
    COLECCION_MENSAJES,
};
use crate::dto::mensaje_dto::SendMessageRequest;
use crate::models::{conversation_id, AuthContext, Message, Role};
use crate::repositories::UserRepository;
use crate::utils::errors::{AppError, AppResult};
use crate::utils::{BestEffort, SideEffectStatus};

/// Mensajería entre dos usuarios agrupada por conversación
#[derive(Clone)]
pub struct MessageService {
    store: Arc<dyn DocumentStore>,
    users: UserRepository,
}

impl MessageService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            store,
        }
    }

    /// Envía un mensaje de quien llama y actualiza el resumen del chat
    pub async fn send(
        &self,
        context: &AuthContext,
        request: SendMessageRequest,
    ) -> AppResult<BestEffort<Message>> {
        if context.is(&request.destinatario_id) {
            return Err(AppError::BadRequest(
                "No puedes enviarte mensajes a ti mismo".to_string(),
            ));
        }
        if self.users.find_by_id(&request.destinatario_id).await?.is_none() {
            return Err(AppError::NotFound("Destinatario no encontrado".to_string()));
        }

        let message = Message {
            id: new_document_id(),
            conversacion_id: conversation_id(&context.uid, &request.destinatario_id),
            remitente_id: context.uid.clone(),
            destinatario_id: request.destinatario_id,
            contenido: request.contenido,
            fecha_envio: Utc::now(),
        };

        self.store
            .put(COLECCION_MENSAJES, &message.id, to_document(&message)?)
            .await?;
        info!("💬 Mensaje {} en la conversación {}", message.id, message.conversacion_id);

        let status = match self.upsert_chat(&message).await {
            Ok(()) => SideEffectStatus::Completed,
            Err(e) => SideEffectStatus::failed("actualizar_chat", e),
        };
        Ok(BestEffort::with_status(message, status))
    }

    async fn upsert_chat(&self, message: &Message) -> StoreResult<()> {
        let chat = json!({
            "id": message.conversacion_id,
            "participantes": [message.remitente_id, message.destinatario_id],
            "ultimoMensaje": message.contenido,
            "fecha": message.fecha_envio,
        });
        if self
            .store
            .create(COLECCION_CHATS, &message.conversacion_id, chat)
            .await?
        {
            return Ok(());
        }

        let mut fields = Map::new();
        fields.insert("ultimoMensaje".to_string(), Value::String(message.contenido.clone()));
        fields.insert("fecha".to_string(), to_document(&message.fecha_envio)?);
        self.store
            .update_fields(COLECCION_CHATS, &message.conversacion_id, fields)
            .await
    }

    /// Mensajes entre dos usuarios en orden de envío. Solo los participantes
    /// o un administrador pueden leerlos.
    pub async fn conversation(
        &self,
        context: &AuthContext,
        usuario1_id: &str,
        usuario2_id: &str,
    ) -> AppResult<Vec<Message>> {
        if !context.is(usuario1_id) && !context.is(usuario2_id) && !context.has_role(Role::Admin) {
            return Err(AppError::Forbidden("No autorizado".to_string()));
        }

        let id = conversation_id(usuario1_id, usuario2_id);
        let mut messages: Vec<Message> = from_documents(
            self.store
                .query_equal(COLECCION_MENSAJES, "conversacionId", &json!(id))
                .await?,
        )?;
        messages.sort_by(|a, b| a.fecha_envio.cmp(&b.fecha_envio));
        Ok(messages)
    }
}
