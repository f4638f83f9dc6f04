//! Módulo de base de datos
//!
//! Contrato del almacén de documentos y sus dos implementaciones:
//! PostgreSQL (JSONB) y memoria.

pub mod document_store;
pub mod memory_store;
pub mod postgres_store;

pub use document_store::*;
pub use memory_store::InMemoryDocumentStore;
pub use postgres_store::PostgresDocumentStore;
