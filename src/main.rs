use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use conectacare_backend::build_router;
use conectacare_backend::clients::{FirebaseIdentityClient, IdentityProvider};
use conectacare_backend::config::database::mask_database_url;
use conectacare_backend::config::{EnvironmentConfig, StoreBackend};
use conectacare_backend::database::{DocumentStore, InMemoryDocumentStore, PostgresDocumentStore};
use conectacare_backend::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env().context("Configuración inválida")?;

    // Configurar logging
    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .init();

    info!("🤝 ConectaCare - API de servicios de cuidado");
    info!("================================================");
    info!("🌍 Entorno: {}", config.environment);

    let store: Arc<dyn DocumentStore> = match (&config.store_backend, &config.database) {
        (StoreBackend::Postgres, Some(database)) => {
            info!("🗄️ Conectando a {}", mask_database_url(&database.url));
            let pool = database.create_pool().await.map_err(|e| {
                error!("❌ Error conectando a la base de datos: {}", e);
                anyhow::anyhow!("Error de base de datos: {}", e)
            })?;
            let store = PostgresDocumentStore::new(pool);
            store
                .ensure_schema()
                .await
                .context("No se pudo crear el esquema de documentos")?;
            Arc::new(store)
        }
        (StoreBackend::Postgres, None) => anyhow::bail!("Falta la configuración de PostgreSQL"),
        (StoreBackend::Memory, _) => {
            warn!("⚠️ Almacén en memoria: los datos se pierden al reiniciar");
            Arc::new(InMemoryDocumentStore::new())
        }
    };
    info!("✅ Almacén de documentos listo ({})", store.name());

    let identity: Arc<dyn IdentityProvider> = Arc::new(
        FirebaseIdentityClient::new(config.firebase.clone())
            .context("No se pudo crear el cliente de Firebase")?,
    );
    info!("🔑 Proveedor de identidad: Firebase ({})", config.firebase.project_id);

    if config.cors_origins.is_empty() && !config.is_development() {
        warn!("⚠️ CORS_ORIGINS vacío fuera de desarrollo: CORS permisivo");
    }

    let addr: SocketAddr = config
        .server_address()
        .parse()
        .context("HOST/PORT no forman una dirección válida")?;
    let app = build_router(AppState::new(config, store, identity));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Recursos: /usuarios /anuncios /solicitudes /evaluaciones /mensajes /admin");
    info!("💚 Health check: GET /api/public/health");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| {
            error!("❌ Error del servidor: {}", e);
            e
        })?;

    info!("👋 Servidor terminado");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el manejador de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
