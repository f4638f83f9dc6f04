use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};

use crate::database::{new_document_id, to_document, DocumentStore, COLECCION_LOGS};
use crate::models::{StatisticsEvent, StatisticsLogEntry, UserProfile};
use crate::utils::errors::AppResult;
use crate::utils::SideEffectStatus;

/// Log de eventos de inicio de sesión y registro
#[derive(Clone)]
pub struct StatisticsService {
    store: Arc<dyn DocumentStore>,
}

impl StatisticsService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Añade un evento al log. Nunca falla: el error queda en el estado devuelto.
    pub async fn record_event(&self, user: &UserProfile, event: StatisticsEvent) -> SideEffectStatus {
        let entry = StatisticsLogEntry {
            id: new_document_id(),
            usuario_id: user.id.clone(),
            email: user.email.clone(),
            nombre: user.nombre.clone(),
            evento: event,
            fecha: Utc::now(),
        };

        let result = match to_document(&entry) {
            Ok(document) => self.store.put(COLECCION_LOGS, &entry.id, document).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                debug!("📊 Evento '{}' registrado para {}", event.as_str(), user.id);
                SideEffectStatus::Completed
            }
            Err(e) => SideEffectStatus::failed("registrar_evento", e),
        }
    }

    pub async fn count_events(&self, event: StatisticsEvent) -> AppResult<usize> {
        let entries = self
            .store
            .query_equal(COLECCION_LOGS, "evento", &json!(event.as_str()))
            .await?;
        info!("📊 Conteo de '{}': {}", event.as_str(), entries.len());
        Ok(entries.len())
    }
}
