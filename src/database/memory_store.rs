//! Almacén de documentos en memoria
//!
//! Usado con `STORE_BACKEND=memory` en desarrollo y en todos los tests.

use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::document_store::{DocumentStore, StoreError, StoreResult};

type Collection = BTreeMap<String, Value>;

#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Número de documentos en una colección
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    async fn scan(&self, collection: &str, keep: impl Fn(&Value) -> bool) -> Vec<Value> {
        self.collections
            .read()
            .await
            .get(collection)
            .map(|docs| docs.values().filter(|doc| keep(doc)).cloned().collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        Ok(self
            .collections
            .read()
            .await
            .get(collection)
            .and_then(|docs| docs.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, document: Value) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();
        if docs.contains_key(id) {
            return Ok(false);
        }
        docs.insert(id.to_string(), document);
        Ok(true)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let mut collections = self.collections.write().await;
        let document = collections
            .get_mut(collection)
            .and_then(|docs| docs.get_mut(id))
            .ok_or_else(|| StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        match document.as_object_mut() {
            Some(object) => {
                object.extend(fields);
                Ok(())
            }
            None => Err(StoreError::Backend(format!(
                "document '{}' in '{}' is not an object",
                id, collection
            ))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        if let Some(docs) = self.collections.write().await.get_mut(collection) {
            docs.remove(id);
        }
        Ok(())
    }

    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Value>> {
        Ok(self
            .scan(collection, |doc| doc.get(field) == Some(value))
            .await)
    }

    async fn query_in(
        &self,
        collection: &str,
        field: &str,
        values: &[Value],
    ) -> StoreResult<Vec<Value>> {
        Ok(self
            .scan(collection, |doc| {
                doc.get(field).map_or(false, |v| values.contains(v))
            })
            .await)
    }

    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        Ok(self.scan(collection, |_| true).await)
    }
}
