use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::{Role, RoleProfile, UserProfile};

// Request del administrador para dar de alta un usuario completo
#[derive(Debug, Deserialize, Validate)]
pub struct AdminCreateUserRequest {
    #[validate(email(message = "El email no tiene un formato válido"))]
    pub email: String,
    #[validate(length(min = 6, message = "La contraseña debe tener al menos 6 caracteres"))]
    pub password: String,
    #[validate(custom = "crate::dto::validar_no_vacio")]
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub rol: Role,
    pub direccion: Option<String>,
    #[serde(default)]
    pub necesidades: Vec<String>,
    pub disponibilidad: Option<String>,
    pub estudios: Option<String>,
    pub experiencia: Option<String>,
    #[serde(default)]
    pub habilidades: Vec<String>,
}

impl AdminCreateUserRequest {
    /// Perfil local para el UID recién creado; solo se copian los campos del rol
    pub fn to_profile(&self, uid: &str) -> UserProfile {
        let perfil = match self.rol {
            Role::Client => RoleProfile::Client {
                direccion: self.direccion.clone(),
                necesidades: self.necesidades.clone(),
            },
            Role::Worker => RoleProfile::Worker {
                disponibilidad: self.disponibilidad.clone(),
                estudios: self.estudios.clone(),
                experiencia: self.experiencia.clone(),
                habilidades: self.habilidades.clone(),
            },
            Role::Admin => RoleProfile::Admin,
        };

        UserProfile {
            id: uid.to_string(),
            nombre: self.nombre.clone(),
            apellido: self.apellido.clone(),
            telefono: self.telefono.clone(),
            email: self.email.clone(),
            perfil,
        }
    }
}

// Estadísticas globales del panel de administración
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatisticsResponse {
    pub inicios_sesion: usize,
    pub registros: usize,
    pub total_anuncios: usize,
}
