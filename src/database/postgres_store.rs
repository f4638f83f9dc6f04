//! Almacén de documentos sobre PostgreSQL
//!
//! Una sola tabla JSONB `documents(collection, id, data, created_at)`.
//! `update_fields` usa el operador `||`, que mezcla claves de primer nivel.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, PgPool};
use tracing::info;

use super::document_store::{DocumentStore, StoreError, StoreResult};

#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crear la tabla de documentos si no existe
    pub async fn ensure_schema(&self) -> StoreResult<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        info!("✅ Tabla 'documents' lista");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn name(&self) -> &str {
        "postgres"
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        let row = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|Json(data)| data))
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, document: Value) -> StoreResult<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(document))
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        let result = sqlx::query(
            "UPDATE documents SET data = data || $3 WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(fields)))
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                collection: collection.to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Value>> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT data FROM documents
            WHERE collection = $1 AND data -> $2 = $3
            ORDER BY created_at
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(Json(value))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(data)| data).collect())
    }

    async fn query_in(
        &self,
        collection: &str,
        field: &str,
        values: &[Value],
    ) -> StoreResult<Vec<Value>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_scalar::<_, Json<Value>>(
            r#"
            SELECT data FROM documents
            WHERE collection = $1 AND $3 @> jsonb_build_array(data -> $2)
            ORDER BY created_at
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(Json(values))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(data)| data).collect())
    }

    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(
            "SELECT data FROM documents WHERE collection = $1 ORDER BY created_at",
        )
        .bind(collection)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|Json(data)| data).collect())
    }
}
