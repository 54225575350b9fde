//! User entity and role.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Authorization role carried by every user record and token claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account restricted to its own records.
    User,
    /// Administrator able to act on any record.
    Admin,
}

/// Application user.
///
/// ## Invariants
/// - `name` is unique across the user store (enforced at registration).
/// - `password_hash` holds an opaque digest, never a plaintext password,
///   and is never serialized into API responses.
/// - Records are immutable after creation except for deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Stable user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub name: String,
    /// Opaque credential digest.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Authorization role.
    pub role: Role,
}

impl User {
    /// Construct a new user record with a fresh identifier.
    pub fn new(name: impl Into<String>, password_hash: impl Into<String>, role: Role) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            password_hash: password_hash.into(),
            role,
        }
    }
}
