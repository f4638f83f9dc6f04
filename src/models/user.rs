//! Perfil de usuario
//!
//! El perfil se guarda como un documento plano en `usuarios/{uid}`. Los
//! atributos propios de cada rol viajan en `RoleProfile`, aplanado bajo la
//! etiqueta `rol`, de modo que un cliente nunca tiene campos de trabajador.

use serde::{Deserialize, Serialize};

use super::auth::Role;

/// Atributos específicos del rol
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rol")]
pub enum RoleProfile {
    #[serde(rename = "CLIENTE")]
    Client {
        direccion: Option<String>,
        #[serde(default)]
        necesidades: Vec<String>,
    },
    #[serde(rename = "TRABAJADOR")]
    Worker {
        disponibilidad: Option<String>,
        estudios: Option<String>,
        experiencia: Option<String>,
        #[serde(default)]
        habilidades: Vec<String>,
    },
    #[serde(rename = "ADMINISTRADOR")]
    Admin,
}

impl RoleProfile {
    pub fn role(&self) -> Role {
        match self {
            RoleProfile::Client { .. } => Role::Client,
            RoleProfile::Worker { .. } => Role::Worker,
            RoleProfile::Admin => Role::Admin,
        }
    }

    /// Perfil vacío para un rol dado
    pub fn empty(role: Role) -> Self {
        match role {
            Role::Client => RoleProfile::Client {
                direccion: None,
                necesidades: Vec::new(),
            },
            Role::Worker => RoleProfile::Worker {
                disponibilidad: None,
                estudios: None,
                experiencia: None,
                habilidades: Vec::new(),
            },
            Role::Admin => RoleProfile::Admin,
        }
    }
}

/// Campos que cualquier usuario puede modificar de su propio perfil
pub const CAMPOS_COMUNES_EDITABLES: [&str; 4] = ["nombre", "apellido", "telefono", "email"];

/// Campos editables propios de un rol
pub fn campos_editables_del_rol(role: Role) -> &'static [&'static str] {
    match role {
        Role::Client => &["direccion", "necesidades"],
        Role::Worker => &["disponibilidad", "estudios", "experiencia", "habilidades"],
        Role::Admin => &[],
    }
}

/// Perfil local de un usuario; `id` es el UID del proveedor de identidad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub email: String,
    #[serde(flatten)]
    pub perfil: RoleProfile,
}

impl UserProfile {
    pub fn role(&self) -> Role {
        self.perfil.role()
    }

    /// Nombre completo para mostrar
    pub fn nombre_completo(&self) -> String {
        match self.apellido.as_deref() {
            Some(apellido) if !apellido.is_empty() => format!("{} {}", self.nombre, apellido),
            _ => self.nombre.clone(),
        }
    }
}
