use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Tipo de evento registrado para las estadísticas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatisticsEvent {
    #[serde(rename = "INICIO_SESION")]
    Login,
    #[serde(rename = "REGISTRO")]
    Registration,
}

impl StatisticsEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatisticsEvent::Login => "INICIO_SESION",
            StatisticsEvent::Registration => "REGISTRO",
        }
    }
}

/// Entrada del log de estadísticas (solo se añaden)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsLogEntry {
    pub id: String,
    #[serde(rename = "usuarioId")]
    pub usuario_id: String,
    pub email: String,
    pub nombre: String,
    pub evento: StatisticsEvent,
    pub fecha: DateTime<Utc>,
}
