//! Shared application state
//!
//! Estado compartido que se pasa a través del router de Axum: la
//! configuración y los dos clientes externos (almacén de documentos y
//! proveedor de identidad), inyectados al arrancar.

use std::sync::Arc;

use crate::clients::IdentityProvider;
use crate::config::environment::EnvironmentConfig;
use crate::database::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<EnvironmentConfig>,
    pub store: Arc<dyn DocumentStore>,
    pub identity: Arc<dyn IdentityProvider>,
}

impl AppState {
    pub fn new(
        config: EnvironmentConfig,
        store: Arc<dyn DocumentStore>,
        identity: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            store,
            identity,
        }
    }
}
