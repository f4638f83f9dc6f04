use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Cow;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::dto::validar_no_vacio;
use crate::models::{RoleProfile, UserProfile};

// Request de registro de un cliente; el UID sale del token
#[derive(Debug, Deserialize, Validate)]
pub struct ClientRegistrationRequest {
    #[validate(email(message = "El email no tiene un formato válido"))]
    pub email: String,
    #[validate(custom = "validar_no_vacio")]
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    #[serde(default)]
    pub necesidades: Vec<String>,
}

impl ClientRegistrationRequest {
    pub fn into_profile(self, uid: &str) -> UserProfile {
        UserProfile {
            id: uid.to_string(),
            nombre: self.nombre,
            apellido: self.apellido,
            telefono: self.telefono,
            email: self.email,
            perfil: RoleProfile::Client {
                direccion: self.direccion,
                necesidades: self.necesidades,
            },
        }
    }
}

// Request de registro de un trabajador
#[derive(Debug, Deserialize, Validate)]
pub struct WorkerRegistrationRequest {
    #[validate(email(message = "El email no tiene un formato válido"))]
    pub email: String,
    #[validate(custom = "validar_no_vacio")]
    pub nombre: String,
    pub apellido: Option<String>,
    pub telefono: Option<String>,
    pub disponibilidad: Option<String>,
    pub estudios: Option<String>,
    pub experiencia: Option<String>,
    #[serde(default)]
    pub habilidades: Vec<String>,
}

impl WorkerRegistrationRequest {
    pub fn into_profile(self, uid: &str) -> UserProfile {
        UserProfile {
            id: uid.to_string(),
            nombre: self.nombre,
            apellido: self.apellido,
            telefono: self.telefono,
            email: self.email,
            perfil: RoleProfile::Worker {
                disponibilidad: self.disponibilidad,
                estudios: self.estudios,
                experiencia: self.experiencia,
                habilidades: self.habilidades,
            },
        }
    }
}

// Cambios parciales de un perfil: nombre de campo -> nuevo valor
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct ProfileUpdateRequest {
    pub fields: Map<String, Value>,
}

impl Validate for ProfileUpdateRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        if self.fields.is_empty() {
            let mut error = ValidationError::new("no_vacio");
            error.message = Some(Cow::from("No hay campos que actualizar"));
            let mut errors = ValidationErrors::new();
            errors.add("campos", error);
            return Err(errors);
        }

        if let Some(email) = self.fields.get("email") {
            let valido = email.as_str().map(validator::validate_email).unwrap_or(false);
            if !valido {
                let mut error = ValidationError::new("email");
                error.message = Some(Cow::from("El email no tiene un formato válido"));
                let mut errors = ValidationErrors::new();
                errors.add("email", error);
                return Err(errors);
            }
        }
        Ok(())
    }
}

// Query de comprobación de email
#[derive(Debug, Deserialize)]
pub struct EmailExistsQuery {
    pub email: String,
}

// Response de comprobación de email
#[derive(Debug, Serialize)]
pub struct EmailExistsResponse {
    pub existe: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;

    #[test]
    fn test_registration_rejects_bad_email_and_blank_name() {
        let request = ClientRegistrationRequest {
            email: "no-es-un-email".into(),
            nombre: "   ".into(),
            apellido: None,
            telefono: None,
            direccion: None,
            necesidades: vec![],
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("nombre"));
    }

    #[test]
    fn test_empty_profile_update_is_invalid() {
        let update: ProfileUpdateRequest = serde_json::from_str("{}").unwrap();
        assert!(update.validate().is_err());
        let update: ProfileUpdateRequest = serde_json::from_str(r#"{"telefono": "600"}"#).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_profile_update_checks_email_format() {
        let update: ProfileUpdateRequest =
            serde_json::from_str(r#"{"email": "no-es-email"}"#).unwrap();
        let errors = update.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));

        let update: ProfileUpdateRequest = serde_json::from_str(r#"{"email": 42}"#).unwrap();
        assert!(update.validate().is_err());

        let update: ProfileUpdateRequest =
            serde_json::from_str(r#"{"email": "nueva@example.com"}"#).unwrap();
        assert!(update.validate().is_ok());
    }

    #[test]
    fn test_worker_registration_builds_worker_profile() {
        let request: WorkerRegistrationRequest = serde_json::from_value(serde_json::json!({
            "email": "w@example.com",
            "nombre": "Ana",
            "habilidades": ["cocina", "limpieza"]
        }))
        .unwrap();
        assert!(request.validate().is_ok());

        let profile = request.into_profile("uid-w");
        assert_eq!(profile.id, "uid-w");
        assert_eq!(profile.role(), Role::Worker);
    }
}
