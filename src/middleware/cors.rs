//! Middleware de CORS

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::environment::EnvironmentConfig;

/// CORS según configuración: permisivo si no hay orígenes configurados
pub fn cors_layer(config: &EnvironmentConfig) -> CorsLayer {
    if config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(&config.cors_origins)
    }
}

/// CORS permisivo. Solo para desarrollo.
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// CORS con orígenes específicos
pub fn cors_middleware_with_origins(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| HeaderValue::from_str(origin).ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            HeaderName::from_static("authorization"),
            HeaderName::from_static("content-type"),
            HeaderName::from_static("accept"),
            HeaderName::from_static("origin"),
            HeaderName::from_static("x-requested-with"),
        ])
        .expose_headers([
            HeaderName::from_static("content-disposition"),
            HeaderName::from_static("x-side-effect-status"),
        ])
        .allow_credentials(true)
        .max_age(std::time::Duration::from_secs(3600))
}
