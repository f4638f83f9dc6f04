use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Estado de una solicitud. Cualquier transición está permitida.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pendiente,
    Aceptada,
    Rechazada,
}

/// Oferta de un trabajador para atender un anuncio
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: String,
    pub anuncio_id: String,
    pub trabajador_id: String,
    /// Copiado del anuncio al crear la solicitud
    pub cliente_id: Option<String>,
    pub estado: ApplicationStatus,
    #[serde(default)]
    pub completado: bool,
    pub fecha_solicitud: DateTime<Utc>,
}
