//! Domain ports defining the edges of the hexagon.
//!
//! Ports describe how the domain expects to interact with driven adapters
//! (the record store, the credential hasher, the token signer). Each trait
//! exposes strongly typed errors so adapters map their failures into
//! predictable variants.

use async_trait::async_trait;
use chrono::Duration;
use thiserror::Error;
use uuid::Uuid;

use super::auth::Principal;
use super::pet::Pet;
use super::user::{Role, User};

/// Errors surfaced by a record-store adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The backing store is unreachable.
    #[error("record store connection failed: {message}")]
    Connection { message: String },
    /// A lookup or write failed inside the store.
    #[error("record store query failed: {message}")]
    Query { message: String },
}

impl RepositoryError {
    /// Helper for connection-level adapter failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// Durable store of user records, keyed by identifier.
///
/// Single-record saves are atomic; no transactional guarantees beyond that.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
    async fn find_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError>;
    /// First record holding the given role, if any. Used by the admin
    /// bootstrap routine.
    async fn find_by_role(&self, role: Role) -> Result<Option<User>, RepositoryError>;
    async fn list(&self) -> Result<Vec<User>, RepositoryError>;
    async fn save(&self, user: &User) -> Result<(), RepositoryError>;
    /// Remove a record, returning it when it existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError>;
}

/// Durable store of pet records, keyed by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, RepositoryError>;
    async fn list_all(&self) -> Result<Vec<Pet>, RepositoryError>;
    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Pet>, RepositoryError>;
    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError>;
    /// Remove a record, returning it when it existed.
    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Pet>, RepositoryError>;
}

/// Errors surfaced by a credential-hashing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// Producing a digest failed.
    #[error("password hashing failed: {message}")]
    Hash { message: String },
    /// A stored digest could not be parsed for verification.
    #[error("stored credential digest is malformed: {message}")]
    MalformedDigest { message: String },
}

/// Opaque password hashing: plaintext in, digest out.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError>;
    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, CredentialError>;
}

/// Errors surfaced by a token-signing adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    /// The token failed verification: malformed, tampered, or expired.
    #[error("token is invalid or expired")]
    Invalid,
    /// Signing a fresh token failed.
    #[error("token signing failed: {message}")]
    Signing { message: String },
}

/// Bearer-token issue/verify boundary. Claims carry the user identifier
/// and role; the adapter owns the wire format and signature.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    fn issue(&self, principal: Principal, ttl: Duration) -> Result<String, TokenError>;
    fn verify(&self, token: &str) -> Result<Principal, TokenError>;
}
