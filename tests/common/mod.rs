//! Infraestructura compartida de los tests de integración

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tower::ServiceExt;

use conectacare_backend::build_router;
use conectacare_backend::clients::{IdentityError, IdentityProvider, VerifiedIdentity};
use conectacare_backend::config::EnvironmentConfig;
use conectacare_backend::database::{
    DocumentStore, InMemoryDocumentStore, StoreResult,
};
use conectacare_backend::state::AppState;

/// Proveedor de identidad falso: el token `token-<uid>` identifica a `<uid>`
#[derive(Default)]
pub struct FakeIdentity {
    pub registered_emails: Mutex<HashSet<String>>,
    pub deleted: Mutex<Vec<String>>,
}

pub fn token_for(uid: &str) -> String {
    format!("token-{}", uid)
}

#[async_trait]
impl IdentityProvider for FakeIdentity {
    async fn verify_token(&self, token: &str) -> Result<VerifiedIdentity, IdentityError> {
        match token.strip_prefix("token-") {
            Some(uid) if !uid.is_empty() => Ok(VerifiedIdentity {
                uid: uid.to_string(),
                email: Some(format!("{}@example.com", uid)),
            }),
            _ => Err(IdentityError::InvalidToken("firma no válida".to_string())),
        }
    }

    async fn create_account(&self, email: &str, _password: &str) -> Result<String, IdentityError> {
        let mut emails = self.registered_emails.lock().await;
        if !emails.insert(email.to_string()) {
            return Err(IdentityError::EmailAlreadyExists(email.to_string()));
        }
        Ok(format!("uid-{}", email.split('@').next().unwrap_or(email)))
    }

    async fn delete_account(&self, uid: &str) -> Result<(), IdentityError> {
        self.deleted.lock().await.push(uid.to_string());
        Ok(())
    }

    async fn email_exists(&self, email: &str) -> Result<bool, IdentityError> {
        Ok(self.registered_emails.lock().await.contains(email))
    }
}

/// Almacén en memoria que cuenta cuántas operaciones recibe
#[derive(Default)]
pub struct CountingStore {
    pub inner: InMemoryDocumentStore,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn tick(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl DocumentStore for CountingStore {
    fn name(&self) -> &str {
        "counting-memory"
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<Value>> {
        self.tick();
        self.inner.get(collection, id).await
    }

    async fn put(&self, collection: &str, id: &str, document: Value) -> StoreResult<()> {
        self.tick();
        self.inner.put(collection, id, document).await
    }

    async fn create(&self, collection: &str, id: &str, document: Value) -> StoreResult<bool> {
        self.tick();
        self.inner.create(collection, id, document).await
    }

    async fn update_fields(
        &self,
        collection: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> StoreResult<()> {
        self.tick();
        self.inner.update_fields(collection, id, fields).await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<()> {
        self.tick();
        self.inner.delete(collection, id).await
    }

    async fn query_equal(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<Value>> {
        self.tick();
        self.inner.query_equal(collection, field, value).await
    }

    async fn query_in(
        &self,
        collection: &str,
        field: &str,
        values: &[Value],
    ) -> StoreResult<Vec<Value>> {
        self.tick();
        self.inner.query_in(collection, field, values).await
    }

    async fn list_all(&self, collection: &str) -> StoreResult<Vec<Value>> {
        self.tick();
        self.inner.list_all(collection).await
    }
}

/// Respuesta de un test: estado, cabeceras y cuerpo crudo
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or(Value::Null)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub struct TestApp {
    pub state: AppState,
    pub store: Arc<CountingStore>,
    pub identity: Arc<FakeIdentity>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(CountingStore::default());
        let identity = Arc::new(FakeIdentity::default());
        let state = AppState::new(EnvironmentConfig::for_tests(), store.clone(), identity.clone());
        Self {
            state,
            store,
            identity,
        }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<Value>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(value) = authorization {
            builder = builder.header("authorization", value);
        }
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = build_router(self.state.clone())
            .oneshot(request)
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec();
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Petición autenticada como `uid`
    pub async fn call(&self, method: Method, uri: &str, uid: &str, body: Option<Value>) -> TestResponse {
        let header = format!("Bearer {}", token_for(uid));
        self.send(method, uri, Some(&header), body).await
    }

    pub async fn register_client(&self, uid: &str) -> TestResponse {
        self.call(
            Method::POST,
            "/usuarios/cliente",
            uid,
            Some(serde_json::json!({
                "email": format!("{}@example.com", uid),
                "nombre": format!("Cliente {}", uid),
                "apellido": "García",
                "direccion": "Calle Mayor 1",
                "necesidades": ["compañía"]
            })),
        )
        .await
    }

    pub async fn register_worker(&self, uid: &str) -> TestResponse {
        self.call(
            Method::POST,
            "/usuarios/trabajador",
            uid,
            Some(serde_json::json!({
                "email": format!("{}@example.com", uid),
                "nombre": format!("Trabajador {}", uid),
                "apellido": "López",
                "disponibilidad": "mañanas",
                "habilidades": ["cocina", "aseo"]
            })),
        )
        .await
    }

    /// Crea directamente un perfil de administrador en el almacén
    pub async fn seed_admin(&self, uid: &str) {
        self.store
            .inner
            .put(
                "usuarios",
                uid,
                serde_json::json!({
                    "id": uid,
                    "nombre": "Admin",
                    "email": format!("{}@example.com", uid),
                    "rol": "ADMINISTRADOR"
                }),
            )
            .await
            .unwrap();
    }
}
