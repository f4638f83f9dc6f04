//! Clients - external collaborators
//!
//! Contrato del proveedor de identidad y su cliente HTTP para Firebase.

pub mod firebase_client;
pub mod identity_provider;

pub use firebase_client::FirebaseIdentityClient;
pub use identity_provider::{IdentityError, IdentityProvider, VerifiedIdentity};
