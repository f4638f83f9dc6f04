//! Middleware del sistema
//!
//! Autenticación con el proveedor de identidad, control de acceso de
//! administración y CORS.

pub mod auth;
pub mod cors;

pub use auth::*;
pub use cors::*;
