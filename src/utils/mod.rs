//! Utilidades del sistema
//!
//! Este módulo contiene utilidades para manejo de errores, validación
//! de cuerpos JSON y resultados con efectos secundarios.

pub mod errors;
pub mod outcome;
pub mod validated_json;

pub use errors::{AppError, AppResult};
pub use outcome::{BestEffort, SideEffectStatus};
pub use validated_json::ValidatedJson;
