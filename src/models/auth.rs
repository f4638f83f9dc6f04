use serde::{Deserialize, Serialize};
use std::fmt;

/// Roles del sistema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "CLIENTE")]
    Client,
    #[serde(rename = "TRABAJADOR")]
    Worker,
    #[serde(rename = "ADMINISTRADOR")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Client => "CLIENTE",
            Role::Worker => "TRABAJADOR",
            Role::Admin => "ADMINISTRADOR",
        }
    }

    /// Nombre de la authority que se adjunta al contexto
    pub fn authority_name(&self) -> String {
        format!("ROLE_{}", self.as_str())
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authority adjuntada a una petición autenticada
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authority {
    /// Token válido, todavía sin perfil local (rutas de registro)
    PreRegistration,
    /// Rol del perfil local
    Role(Role),
}

impl Authority {
    pub fn name(&self) -> String {
        match self {
            Authority::PreRegistration => "ROLE_PRE_REGISTRO".to_string(),
            Authority::Role(role) => role.authority_name(),
        }
    }
}

/// Contexto de autorización de la petición en curso.
///
/// Lo construye el middleware de autenticación y llega a los handlers como
/// extensión tipada; es inmutable durante toda la petición.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub uid: String,
    pub email: Option<String>,
    pub authority: Authority,
}

impl AuthContext {
    pub fn role(&self) -> Option<Role> {
        match self.authority {
            Authority::Role(role) => Some(role),
            Authority::PreRegistration => None,
        }
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }

    pub fn is(&self, uid: &str) -> bool {
        self.uid == uid
    }
}
