use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Valoración de un cliente sobre el trabajo de un trabajador.
///
/// El `id` coincide con el de la solicitud evaluada: una solicitud admite
/// como mucho una evaluación.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evaluation {
    pub id: String,
    pub solicitud_id: String,
    pub trabajador_id: String,
    pub cliente_id: String,
    pub estrellas: u8,
    pub comentario: Option<String>,
    pub fecha_evaluacion: DateTime<Utc>,
}
