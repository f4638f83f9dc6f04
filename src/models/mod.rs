//! Modelos del sistema
//!
//! Este módulo contiene los modelos de datos tal y como se guardan en el
//! almacén de documentos.

pub mod anuncio;
pub mod auth;
pub mod estadistica;
pub mod evaluacion;
pub mod mensaje;
pub mod solicitud;
pub mod user;

pub use anuncio::Ad;
pub use auth::{AuthContext, Authority, Role};
pub use estadistica::{StatisticsEvent, StatisticsLogEntry};
pub use evaluacion::Evaluation;
pub use mensaje::{conversation_id, Message};
pub use solicitud::{Application, ApplicationStatus};
pub use user::{RoleProfile, UserProfile};
