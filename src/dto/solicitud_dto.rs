use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Application, ApplicationStatus, RoleProfile, UserProfile};

// Request para solicitar un anuncio
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateApplicationRequest {
    #[validate(custom = "crate::dto::validar_no_vacio")]
    pub anuncio_id: String,
}

// Request para cambiar el estado de una solicitud
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub estado: ApplicationStatus,
}

/// Nombre que se muestra cuando el trabajador ya no tiene perfil
pub const TRABAJADOR_NO_ENCONTRADO: &str = "Trabajador no encontrado";

// Solicitud vista por el cliente, con los datos del trabajador
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationWithWorker {
    pub id: String,
    pub anuncio_id: String,
    pub trabajador_id: String,
    pub fecha_solicitud: DateTime<Utc>,
    pub estado: ApplicationStatus,
    pub completado: bool,
    pub evaluacion_existente: bool,
    pub trabajador_nombre: String,
    pub disponibilidad: Option<String>,
    pub estudios: Option<String>,
    pub experiencia: Option<String>,
    pub habilidades: Vec<String>,
}

impl ApplicationWithWorker {
    pub fn from_parts(application: Application, worker: Option<&UserProfile>) -> Self {
        let mut view = Self {
            id: application.id,
            anuncio_id: application.anuncio_id,
            trabajador_id: application.trabajador_id,
            fecha_solicitud: application.fecha_solicitud,
            estado: application.estado,
            completado: application.completado,
            evaluacion_existente: false,
            trabajador_nombre: TRABAJADOR_NO_ENCONTRADO.to_string(),
            disponibilidad: None,
            estudios: None,
            experiencia: None,
            habilidades: Vec::new(),
        };

        if let Some(worker) = worker {
            view.trabajador_nombre = worker.nombre_completo();
            if let RoleProfile::Worker {
                disponibilidad,
                estudios,
                experiencia,
                habilidades,
            } = &worker.perfil
            {
                view.disponibilidad = disponibilidad.clone();
                view.estudios = estudios.clone();
                view.experiencia = experiencia.clone();
                view.habilidades = habilidades.clone();
            }
        }

        view
    }
}
