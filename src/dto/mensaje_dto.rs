use serde::Deserialize;
use validator::Validate;

// Request para enviar un mensaje; el remitente es quien llama
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    #[validate(custom = "crate::dto::validar_no_vacio")]
    pub destinatario_id: String,
    #[validate(custom = "crate::dto::validar_no_vacio")]
    pub contenido: String,
}

// Query de conversación entre dos usuarios
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationQuery {
    pub usuario1_id: String,
    pub usuario2_id: String,
}
