//! Middleware de autenticación
//!
//! Clasifica cada petición (pública, registro o protegida), verifica el
//! token Bearer con el proveedor de identidad y resuelve el rol del perfil
//! local. El resultado viaja como `AuthContext` en las extensiones de la
//! petición.

use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
    Extension,
};
use tracing::{debug, warn};

use crate::clients::IdentityError;
use crate::models::{AuthContext, Authority, Role};
use crate::repositories::UserRepository;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Rutas de alta de perfil: token válido, todavía sin perfil local
const RUTAS_REGISTRO: [&str; 2] = ["/usuarios/cliente", "/usuarios/trabajador"];

/// Consulta pública de existencia de email
const RUTA_EMAIL_EXISTE: &str = "/usuarios/email-existe";

pub const TOKEN_REQUERIDO: &str = "Token de autenticación de Firebase requerido";
pub const TOKEN_INVALIDO: &str = "Token de Firebase inválido o expirado";

/// Clase de ruta a efectos de autenticación
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Registration,
    Protected,
}

/// Decide la clase de una ruta a partir del método y la ruta
pub fn classify_route(method: &Method, path: &str, public_prefixes: &[String]) -> RouteClass {
    let public_prefix = public_prefixes.iter().any(|prefix| {
        let prefix = prefix.trim_end_matches('/');
        !prefix.is_empty()
            && (path == prefix
                || path
                    .strip_prefix(prefix)
                    .map_or(false, |rest| rest.starts_with('/')))
    });

    if public_prefix || (method == Method::GET && path == RUTA_EMAIL_EXISTE) {
        RouteClass::Public
    } else if method == Method::POST && RUTAS_REGISTRO.contains(&path) {
        RouteClass::Registration
    } else {
        RouteClass::Protected
    }
}

/// Extrae el token de una cabecera `Authorization: Bearer <token>`
pub fn bearer_token(value: Option<&str>) -> Option<&str> {
    value
        .and_then(|auth_str| auth_str.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware de autenticación
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_string();
    let class = classify_route(request.method(), &path, &state.config.public_route_prefixes);

    if class == RouteClass::Public {
        debug!("🌐 Ruta pública: {} {}", request.method(), path);
        return Ok(next.run(request).await);
    }

    let token = bearer_token(
        request
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok()),
    )
    .ok_or_else(|| AppError::Unauthorized(TOKEN_REQUERIDO.to_string()))?
    .to_string();

    let identity = state.identity.verify_token(&token).await.map_err(|e| match e {
        IdentityError::InvalidToken(reason) => {
            warn!("🔒 Token rechazado en {}: {}", path, reason);
            AppError::Unauthorized(TOKEN_INVALIDO.to_string())
        }
        other => AppError::Identity(other),
    })?;

    let authority = if class == RouteClass::Registration {
        Authority::PreRegistration
    } else {
        let profile = UserRepository::new(state.store.clone())
            .find_by_id(&identity.uid)
            .await?
            .ok_or_else(|| {
                warn!("🚫 UID {} sin perfil local ({})", identity.uid, path);
                AppError::Forbidden(format!(
                    "Usuario ({}) no encontrado en la base de datos local.",
                    identity.uid
                ))
            })?;
        Authority::Role(profile.role())
    };

    debug!("🔓 {} autenticado como {} en {}", identity.uid, authority.name(), path);
    request.extensions_mut().insert(AuthContext {
        uid: identity.uid,
        email: identity.email,
        authority,
    });

    Ok(next.run(request).await)
}

/// Middleware para rutas de administración
pub async fn admin_only_middleware(
    Extension(context): Extension<AuthContext>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if !context.has_role(Role::Admin) {
        warn!("🚫 {} intentó acceder a administración", context.uid);
        return Err(AppError::Forbidden(
            "Se requieren permisos de administrador".to_string(),
        ));
    }

    Ok(next.run(request).await)
}
