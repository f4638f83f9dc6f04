//! Contrato del proveedor de identidad
//!
//! Emite y verifica tokens firmados y gestiona las cuentas de acceso.
//! La aplicación solo conoce este trait; la implementación concreta
//! (Firebase) se inyecta en el `AppState`.

use async_trait::async_trait;
use thiserror::Error;

/// Identidad verificada extraída de un token válido
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedIdentity {
    pub uid: String,
    pub email: Option<String>,
}

/// Errores del proveedor de identidad
#[derive(Error, Debug)]
pub enum IdentityError {
    /// Firma inválida, token expirado, audiencia o emisor incorrectos
    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error("email already registered: {0}")]
    EmailAlreadyExists(String),

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("identity provider misconfigured: {0}")]
    Configuration(String),

    #[error("identity provider unavailable: {0}")]
    Upstream(String),
}

impl From<reqwest::Error> for IdentityError {
    fn from(e: reqwest::Error) -> Self {
        IdentityError::Upstream(e.to_string())
    }
}

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Verificar un token y devolver el sujeto (UID) y sus claims
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError>;

    /// Crear una cuenta de acceso; devuelve el UID asignado
    async fn create_account(&self, email: &str, password: &str) -> Result<String, IdentityError>;

    async fn delete_account(&self, uid: &str) -> Result<(), IdentityError>;

    async fn email_exists(&self, email: &str) -> Result<bool, IdentityError>;
}
