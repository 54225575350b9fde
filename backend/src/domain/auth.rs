//! Authentication and authorization primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service, and
//! collapse the scattered admin-or-owner checks into a single capability
//! check on [`Principal`].

use std::fmt;

use uuid::Uuid;
use zeroize::Zeroizing;

use super::error::DomainError;
use super::user::Role;

/// Domain error returned when credential payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialsValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for CredentialsValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for CredentialsValidationError {}

/// Validated username/password pair used by registration and login.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    username: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
    ) -> Result<Self, CredentialsValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(CredentialsValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(CredentialsValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for user lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Authenticated caller identity extracted from a verified bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// Identifier of the authenticated user.
    pub id: Uuid,
    /// Role carried in the token claims.
    pub role: Role,
}

impl Principal {
    /// Whether the caller holds the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(self.role, Role::Admin)
    }

    /// Ownership gate: allow administrators and the resource owner,
    /// deny everyone else.
    ///
    /// # Errors
    /// Returns a forbidden [`DomainError`] when the caller is neither an
    /// administrator nor the owner.
    pub fn authorize_owner(&self, resource_owner_id: Uuid) -> Result<(), DomainError> {
        if self.is_admin() || self.id == resource_owner_id {
            return Ok(());
        }
        Err(DomainError::forbidden(
            "not authorised to access this resource",
        ))
    }

    /// Admin gate used by admin-only listings.
    ///
    /// # Errors
    /// Returns a forbidden [`DomainError`] for non-administrators.
    pub fn require_admin(&self) -> Result<(), DomainError> {
        if self.is_admin() {
            return Ok(());
        }
        Err(DomainError::forbidden("administrator role required"))
    }
}
