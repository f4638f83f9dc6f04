use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::Evaluation;

// Request para evaluar una solicitud completada
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvaluationRequest {
    #[validate(custom = "crate::dto::validar_no_vacio")]
    pub solicitud_id: String,
    #[validate(range(min = 1, max = 5, message = "La calificación debe estar entre 1 y 5"))]
    pub estrellas: u8,
    #[validate(length(max = 1000, message = "El comentario no puede superar los 1000 caracteres"))]
    pub comentario: Option<String>,
}

/// Nombre usado cuando el cliente que evaluó ya no existe
pub const CLIENTE_DESCONOCIDO: &str = "Desconocido";

// Evaluación vista por el trabajador
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationSummary {
    pub id: String,
    pub comentario: Option<String>,
    pub estrellas: u8,
    pub fecha_evaluacion: DateTime<Utc>,
    pub nombre_cliente: String,
}

impl EvaluationSummary {
    pub fn new(evaluation: Evaluation, nombre_cliente: Option<String>) -> Self {
        Self {
            id: evaluation.id,
            comentario: evaluation.comentario,
            estrellas: evaluation.estrellas,
            fecha_evaluacion: evaluation.fecha_evaluacion,
            nombre_cliente: nombre_cliente.unwrap_or_else(|| CLIENTE_DESCONOCIDO.to_string()),
        }
    }
}

// Media de valoraciones de un trabajador
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingAverage {
    pub media_estrellas: f64,
    pub total_valoraciones: usize,
}

impl RatingAverage {
    pub fn from_evaluations(evaluations: &[Evaluation]) -> Self {
        let total = evaluations.len();
        let media = if total == 0 {
            0.0
        } else {
            let suma: u32 = evaluations.iter().map(|e| u32::from(e.estrellas)).sum();
            f64::from(suma) / total as f64
        };
        Self {
            media_estrellas: media,
            total_valoraciones: total,
        }
    }
}
