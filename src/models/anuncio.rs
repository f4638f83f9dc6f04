use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Anuncio publicado por un cliente con las categorías de ayuda que necesita
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ad {
    pub id: String,
    pub cliente_id: String,
    pub nombre_cliente: Option<String>,
    #[serde(default)]
    pub hogar: Vec<String>,
    #[serde(default)]
    pub personal: Vec<String>,
    #[serde(default)]
    pub acompanamiento: Vec<String>,
    #[serde(default)]
    pub salud: Vec<String>,
    pub comentarios: Option<String>,
    pub fecha_creacion: DateTime<Utc>,
}
