//! Configuración de variables de entorno
//!
//! Este módulo maneja la configuración del entorno y variables de configuración.

use anyhow::{Context, Result};
use std::env;

use super::database::DatabaseConfig;

const JWKS_URL_POR_DEFECTO: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";
const IDENTITY_TOOLKIT_URL_POR_DEFECTO: &str = "https://identitytoolkit.googleapis.com/v1";

/// Prefijos de rutas públicas (docs, health, API pública)
pub const PREFIJOS_PUBLICOS_POR_DEFECTO: [&str; 5] = [
    "/api/public",
    "/swagger-ui",
    "/swagger-resources",
    "/v3/api-docs",
    "/webjars",
];

/// Backend del almacén de documentos
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    Memory,
}

/// Configuración del proveedor de identidad (Firebase)
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    pub project_id: String,
    pub api_key: Option<String>,
    pub admin_token: Option<String>,
    pub jwks_url: String,
    pub identity_toolkit_url: String,
}

/// Configuración del entorno
#[derive(Debug, Clone)]
pub struct EnvironmentConfig {
    pub environment: String,
    pub host: String,
    pub port: u16,
    pub log_level: tracing::Level,
    pub cors_origins: Vec<String>,
    pub public_route_prefixes: Vec<String>,
    pub store_backend: StoreBackend,
    pub database: Option<DatabaseConfig>,
    pub firebase: FirebaseConfig,
}

impl EnvironmentConfig {
    /// Leer la configuración desde variables de entorno
    pub fn from_env() -> Result<Self> {
        let port = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .context("PORT must be a valid number")?;

        let log_level = env::var("LOG_LEVEL")
            .unwrap_or_else(|_| "info".to_string())
            .parse()
            .context("LOG_LEVEL must be one of trace, debug, info, warn, error")?;

        let store_backend = match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => StoreBackend::Postgres,
            "memory" => StoreBackend::Memory,
            other => anyhow::bail!("STORE_BACKEND '{}' no soportado (postgres | memory)", other),
        };

        let database = match store_backend {
            StoreBackend::Postgres => Some(DatabaseConfig::from_env()?),
            StoreBackend::Memory => None,
        };

        let public_route_prefixes = match env::var("PUBLIC_ROUTE_PREFIXES") {
            Ok(value) => split_list(&value),
            Err(_) => PREFIJOS_PUBLICOS_POR_DEFECTO
                .iter()
                .map(|p| p.to_string())
                .collect(),
        };

        Ok(Self {
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port,
            log_level,
            cors_origins: env::var("CORS_ORIGINS")
                .map(|value| split_list(&value))
                .unwrap_or_default(),
            public_route_prefixes,
            store_backend,
            database,
            firebase: FirebaseConfig {
                project_id: env::var("FIREBASE_PROJECT_ID")
                    .context("FIREBASE_PROJECT_ID must be set")?,
                api_key: env::var("FIREBASE_API_KEY").ok(),
                admin_token: env::var("FIREBASE_ADMIN_TOKEN").ok(),
                jwks_url: env::var("FIREBASE_JWKS_URL")
                    .unwrap_or_else(|_| JWKS_URL_POR_DEFECTO.to_string()),
                identity_toolkit_url: env::var("IDENTITY_TOOLKIT_URL")
                    .unwrap_or_else(|_| IDENTITY_TOOLKIT_URL_POR_DEFECTO.to_string()),
            },
        })
    }

    /// Configuración mínima para tests: almacén en memoria, prefijos por defecto
    pub fn for_tests() -> Self {
        Self {
            environment: "test".to_string(),
            host: "127.0.0.1".to_string(),
            port: 0,
            log_level: tracing::Level::DEBUG,
            cors_origins: Vec::new(),
            public_route_prefixes: PREFIJOS_PUBLICOS_POR_DEFECTO
                .iter()
                .map(|p| p.to_string())
                .collect(),
            store_backend: StoreBackend::Memory,
            database: None,
            firebase: FirebaseConfig {
                project_id: "conectacare-test".to_string(),
                api_key: None,
                admin_token: None,
                jwks_url: JWKS_URL_POR_DEFECTO.to_string(),
                identity_toolkit_url: IDENTITY_TOOLKIT_URL_POR_DEFECTO.to_string(),
            },
        }
    }

    /// Verificar si estamos en modo desarrollo
    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }

    /// Obtener la dirección del servidor
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
