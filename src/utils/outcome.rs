//! Resultados de operaciones con efectos secundarios "best effort"
//!
//! La operación principal ya se completó; el efecto secundario (log de
//! estadísticas, marcar chat como evaluado, ...) puede haber fallado sin
//! afectar al resultado. El fallo queda registrado en el valor devuelto.

use axum::{
    http::{HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};

/// Cabecera que marca una respuesta cuyo efecto secundario falló
pub const SIDE_EFFECT_HEADER: HeaderName = HeaderName::from_static("x-side-effect-status");

/// Estado de un efecto secundario
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffectStatus {
    Completed,
    Failed {
        operation: &'static str,
        reason: String,
    },
}

impl SideEffectStatus {
    pub fn failed(operation: &'static str, reason: impl ToString) -> Self {
        tracing::warn!("⚠️ Efecto secundario '{}' falló: {}", operation, reason.to_string());
        SideEffectStatus::Failed {
            operation,
            reason: reason.to_string(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, SideEffectStatus::Failed { .. })
    }
}

/// Valor principal más el estado de su efecto secundario
#[derive(Debug, Clone)]
pub struct BestEffort<T> {
    pub value: T,
    pub side_effect: SideEffectStatus,
}

impl<T> BestEffort<T> {
    pub fn with_status(value: T, side_effect: SideEffectStatus) -> Self {
        Self { value, side_effect }
    }

    pub fn is_degraded(&self) -> bool {
        self.side_effect.is_degraded()
    }

    /// Adjunta la cabecera de estado a una respuesta ya construida.
    pub fn into_response_with<R: IntoResponse>(self, build: impl FnOnce(T) -> R) -> Response {
        let degraded = self.is_degraded();
        let mut response = build(self.value).into_response();
        if degraded {
            response
                .headers_mut()
                .insert(SIDE_EFFECT_HEADER, HeaderValue::from_static("degraded"));
        }
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_failed_keeps_operation_and_reason() {
        let status = SideEffectStatus::failed("marcar chat", "sin documento");

        assert!(status.is_degraded());
        assert_eq!(
            status,
            SideEffectStatus::Failed {
                operation: "marcar chat",
                reason: "sin documento".to_string()
            }
        );
    }

    #[test]
    fn test_degraded_response_carries_header() {
        let outcome = BestEffort::with_status(7, SideEffectStatus::failed("log", "caído"));
        let response = outcome.into_response_with(|_| StatusCode::CREATED);

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(response.headers()[SIDE_EFFECT_HEADER], "degraded");
    }

    #[test]
    fn test_completed_response_has_no_header() {
        let response = BestEffort::with_status((), SideEffectStatus::Completed).into_response_with(|_| StatusCode::OK);
        assert!(response.headers().get(SIDE_EFFECT_HEADER).is_none());
    }
}
