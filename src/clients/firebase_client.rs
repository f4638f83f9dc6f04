//! Cliente de Firebase Authentication
//!
//! Verifica ID tokens RS256 contra las claves públicas de Google y usa la
//! API REST de Identity Toolkit para las operaciones de cuentas.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, Validation};
use reqwest::{header::CACHE_CONTROL, Client, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use super::identity_provider::{IdentityError, IdentityProvider, VerifiedIdentity};
use crate::config::FirebaseConfig;

/// Vida por defecto del juego de claves si Google no envía `max-age`
const TTL_CLAVES_POR_DEFECTO_SEGS: i64 = 3600;

/// Claims de un ID token de Firebase
#[derive(Debug, Deserialize)]
struct FirebaseClaims {
    sub: String,
    email: Option<String>,
}

/// Claves públicas descargadas, válidas hasta `expires_at`
#[derive(Clone)]
struct CachedKeys {
    keys: JwkSet,
    expires_at: DateTime<Utc>,
}

impl CachedKeys {
    fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SignUpResponse {
    local_id: String,
}

#[derive(Debug, Deserialize)]
struct CreateAuthUriResponse {
    #[serde(default)]
    registered: bool,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorBody {
    error: GoogleError,
}

#[derive(Debug, Deserialize)]
struct GoogleError {
    message: String,
}

#[derive(Clone)]
pub struct FirebaseIdentityClient {
    http_client: Client,
    config: FirebaseConfig,
    keys: Arc<RwLock<Option<CachedKeys>>>,
}

impl FirebaseIdentityClient {
    pub fn new(config: FirebaseConfig) -> Result<Self, IdentityError> {
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()?;

        Ok(Self {
            http_client,
            config,
            keys: Arc::new(RwLock::new(None)),
        })
    }

    fn issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.config.project_id)
    }

    fn api_key(&self) -> Result<&str, IdentityError> {
        self.config
            .api_key
            .as_deref()
            .ok_or_else(|| IdentityError::Configuration("FIREBASE_API_KEY no configurada".into()))
    }

    /// Obtener el juego de claves vigente, descargándolo si caducó
    async fn public_keys(&self) -> Result<JwkSet, IdentityError> {
        if let Some(cached) = self.keys.read().await.as_ref() {
            if !cached.is_expired() {
                return Ok(cached.keys.clone());
            }
        }

        debug!("🔑 Descargando claves públicas de {}", self.config.jwks_url);
        let response = self
            .http_client
            .get(&self.config.jwks_url)
            .send()
            .await?
            .error_for_status()?;

        let max_age = response
            .headers()
            .get(CACHE_CONTROL)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_max_age)
            .unwrap_or(TTL_CLAVES_POR_DEFECTO_SEGS);

        let keys: JwkSet = response.json().await?;
        info!("🔑 {} claves públicas válidas durante {}s", keys.keys.len(), max_age);

        *self.keys.write().await = Some(CachedKeys {
            keys: keys.clone(),
            expires_at: Utc::now() + Duration::seconds(max_age),
        });

        Ok(keys)
    }

    async fn google_error(response: reqwest::Response) -> String {
        let status = response.status();
        match response.json::<GoogleErrorBody>().await {
            Ok(body) => body.error.message,
            Err(_) => format!("HTTP {}", status),
        }
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityClient {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        let header = decode_header(token)
            .map_err(|e| IdentityError::InvalidToken(format!("cabecera ilegible: {}", e)))?;

        if header.alg != Algorithm::RS256 {
            return Err(IdentityError::InvalidToken(format!(
                "algoritmo no permitido: {:?}",
                header.alg
            )));
        }

        let kid = header
            .kid
            .ok_or_else(|| IdentityError::InvalidToken("token sin 'kid'".into()))?;

        let keys = self.public_keys().await?;
        let jwk = keys
            .find(&kid)
            .ok_or_else(|| IdentityError::InvalidToken(format!("clave '{}' desconocida", kid)))?;

        let decoding_key = DecodingKey::from_jwk(jwk)
            .map_err(|e| IdentityError::Upstream(format!("clave pública inválida: {}", e)))?;

        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_audience(&[&self.config.project_id]);
        validation.set_issuer(&[self.issuer()]);

        let claims = decode::<FirebaseClaims>(token, &decoding_key, &validation)
            .map_err(|e| IdentityError::InvalidToken(e.to_string()))?
            .claims;

        if claims.sub.is_empty() {
            return Err(IdentityError::InvalidToken("'sub' vacío".into()));
        }

        Ok(VerifiedIdentity {
            uid: claims.sub,
            email: claims.email,
        })
    }

    async fn create_account(&self, email: &str, password: &str) -> Result<String, IdentityError> {
        let url = format!("{}/accounts:signUp", self.config.identity_toolkit_url);
        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.api_key()?)])
            .json(&json!({
                "email": email,
                "password": password,
                "returnSecureToken": false
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let message = Self::google_error(response).await;
            if message.starts_with("EMAIL_EXISTS") {
                return Err(IdentityError::EmailAlreadyExists(email.to_string()));
            }
            return Err(IdentityError::Upstream(message));
        }

        let created: SignUpResponse = response.json().await?;
        info!("👤 Cuenta creada en Firebase: {}", created.local_id);
        Ok(created.local_id)
    }

    async fn delete_account(&self, uid: &str) -> Result<(), IdentityError> {
        let admin_token = self.config.admin_token.as_deref().ok_or_else(|| {
            IdentityError::Configuration("FIREBASE_ADMIN_TOKEN no configurado".into())
        })?;

        let url = format!(
            "{}/projects/{}/accounts:delete",
            self.config.identity_toolkit_url, self.config.project_id
        );
        let response = self
            .http_client
            .post(url)
            .bearer_auth(admin_token)
            .json(&json!({ "localId": uid }))
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(IdentityError::AccountNotFound(uid.to_string()));
        }
        if !response.status().is_success() {
            let message = Self::google_error(response).await;
            if message.starts_with("USER_NOT_FOUND") {
                return Err(IdentityError::AccountNotFound(uid.to_string()));
            }
            warn!("⚠️ Error eliminando cuenta {}: {}", uid, message);
            return Err(IdentityError::Upstream(message));
        }

        info!("🗑️ Cuenta {} eliminada de Firebase", uid);
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, IdentityError> {
        let url = format!("{}/accounts:createAuthUri", self.config.identity_toolkit_url);
        let response = self
            .http_client
            .post(url)
            .query(&[("key", self.api_key()?)])
            .json(&json!({
                "identifier": email,
                "continueUri": "http://localhost"
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(IdentityError::Upstream(Self::google_error(response).await));
        }

        let body: CreateAuthUriResponse = response.json().await?;
        Ok(body.registered)
    }
}

/// Extraer `max-age` de una cabecera Cache-Control
fn parse_max_age(cache_control: &str) -> Option<i64> {
    cache_control
        .split(',')
        .map(str::trim)
        .find_map(|directive| directive.strip_prefix("max-age="))
        .and_then(|seconds| seconds.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvironmentConfig;

    #[test]
    fn test_parse_max_age() {
        assert_eq!(
            parse_max_age("public, max-age=19302, must-revalidate, no-transform"),
            Some(19302)
        );
        assert_eq!(parse_max_age("no-cache"), None);
    }

    #[test]
    fn test_issuer_uses_project_id() {
        let client = FirebaseIdentityClient::new(EnvironmentConfig::for_tests().firebase).unwrap();
        assert_eq!(client.issuer(), "https://securetoken.google.com/conectacare-test");
    }

    #[tokio::test]
    async fn test_garbage_token_is_rejected_without_network() {
        let client = FirebaseIdentityClient::new(EnvironmentConfig::for_tests().firebase).unwrap();
        let result = client.verify_token("not-a-jwt").await;
        assert!(matches!(result, Err(IdentityError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_account_operations_require_api_key() {
        let client = FirebaseIdentityClient::new(EnvironmentConfig::for_tests().firebase).unwrap();
        let result = client.email_exists("ana@example.com").await;
        assert!(matches!(result, Err(IdentityError::Configuration(_))));
    }
}
