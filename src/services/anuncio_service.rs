use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::database::{
    from_documents, new_document_id, to_document, DocumentStore, COLECCION_ANUNCIOS,
};
use crate::dto::anuncio_dto::CreateAdRequest;
use crate::models::{Ad, AuthContext, Role};
use crate::repositories::UserRepository;
use crate::services::{ensure_role, load_document};
use crate::utils::errors::{AppError, AppResult};

pub const ANUNCIO_NO_ENCONTRADO: &str = "Anuncio no encontrado";

#[derive(Clone)]
pub struct AdService {
    store: Arc<dyn DocumentStore>,
    users: UserRepository,
}

impl AdService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            users: UserRepository::new(store.clone()),
            store,
        }
    }

    /// Publica un anuncio a nombre de quien llama, que debe ser cliente
    pub async fn create(&self, context: &AuthContext, request: CreateAdRequest) -> AppResult<Ad> {
        ensure_role(context, Role::Client, "Solo los clientes pueden publicar anuncios")?;

        let poster = self
            .users
            .find_by_id(&context.uid)
            .await?
            .ok_or_else(|| AppError::Forbidden("El cliente no tiene perfil".to_string()))?;

        let ad = Ad {
            id: new_document_id(),
            cliente_id: poster.id.clone(),
            nombre_cliente: Some(poster.nombre_completo()),
            hogar: request.hogar,
            personal: request.personal,
            acompanamiento: request.acompanamiento,
            salud: request.salud,
            comentarios: request.comentarios,
            fecha_creacion: Utc::now(),
        };

        self.store
            .put(COLECCION_ANUNCIOS, &ad.id, to_document(&ad)?)
            .await?;
        info!("📢 Anuncio {} publicado por {}", ad.id, ad.cliente_id);
        Ok(ad)
    }

    pub async fn find_by_id(&self, id: &str) -> AppResult<Ad> {
        load_document(self.store.as_ref(), COLECCION_ANUNCIOS, id, ANUNCIO_NO_ENCONTRADO).await
    }

    pub async fn find_all(&self) -> AppResult<Vec<Ad>> {
        let documents = self.store.list_all(COLECCION_ANUNCIOS).await?;
        Ok(from_documents(documents)?)
    }

    pub async fn find_by_client(&self, cliente_id: &str) -> AppResult<Vec<Ad>> {
        let documents = self
            .store
            .query_equal(COLECCION_ANUNCIOS, "clienteId", &json!(cliente_id))
            .await?;
        Ok(from_documents(documents)?)
    }

    pub async fn count_all(&self) -> AppResult<usize> {
        Ok(self.store.list_all(COLECCION_ANUNCIOS).await?.len())
    }
}
