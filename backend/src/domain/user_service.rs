//! User lifecycle services: registration, login, queries, admin bootstrap.

use std::sync::Arc;

use chrono::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

use super::auth::{Credentials, Principal};
use super::error::DomainError;
use super::ports::{PasswordHasher, RepositoryError, TokenService, UserRepository};
use super::user::{Role, User};

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// Signed bearer token carrying {userId, role} claims.
    pub token: String,
    /// The authenticated user record.
    pub user: User,
}

/// Application service over the user record store.
#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
    token_ttl: Duration,
}

impl UserService {
    /// Create a new service with the given adapters.
    pub fn new(
        users: Arc<dyn UserRepository>,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
        token_ttl: Duration,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens,
            token_ttl,
        }
    }

    fn map_repository_error(error: RepositoryError) -> DomainError {
        DomainError::internal(format!("user store failure: {error}"))
    }

    /// Register a new regular user, enforcing name uniqueness.
    #[instrument(skip_all, fields(username = credentials.username()))]
    pub async fn register(&self, credentials: Credentials) -> Result<User, DomainError> {
        let existing = self
            .users
            .find_by_name(credentials.username())
            .await
            .map_err(Self::map_repository_error)?;
        if existing.is_some() {
            return Err(DomainError::invalid_request(
                "username is already registered",
            ));
        }

        let digest = self
            .hasher
            .hash(credentials.password())
            .map_err(|err| DomainError::internal(err.to_string()))?;
        let user = User::new(credentials.username(), digest, Role::User);
        self.users
            .save(&user)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Authenticate a user and issue a bearer token.
    ///
    /// Unknown names and wrong passwords produce the same error so the
    /// response does not leak which usernames exist.
    #[instrument(skip_all, fields(username = credentials.username()))]
    pub async fn login(&self, credentials: Credentials) -> Result<LoginOutcome, DomainError> {
        let invalid = || DomainError::invalid_request("invalid username or password");

        let user = self
            .users
            .find_by_name(credentials.username())
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(invalid)?;

        let verified = self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .map_err(|err| DomainError::internal(err.to_string()))?;
        if !verified {
            return Err(invalid());
        }

        let principal = Principal {
            id: user.id,
            role: user.role,
        };
        let token = self
            .tokens
            .issue(principal, self.token_ttl)
            .map_err(|err| DomainError::internal(err.to_string()))?;
        info!(user_id = %user.id, "login succeeded");
        Ok(LoginOutcome { token, user })
    }

    /// List every user. Admin only.
    pub async fn list(&self, principal: Principal) -> Result<Vec<User>, DomainError> {
        principal.require_admin()?;
        self.users.list().await.map_err(Self::map_repository_error)
    }

    /// Fetch a user record. Self or admin.
    pub async fn get(&self, principal: Principal, id: Uuid) -> Result<User, DomainError> {
        principal.authorize_owner(id)?;
        self.users
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| DomainError::not_found("user not found"))
    }

    /// Delete a user record. Self or admin.
    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), DomainError> {
        principal.authorize_owner(id)?;
        let removed = self
            .users
            .delete_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        if removed.is_none() {
            return Err(DomainError::not_found("user not found"));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }

    /// Idempotent bootstrap: make sure one admin-role record exists.
    ///
    /// Returns `true` when a record was created. Run once at process
    /// initialisation, before the server accepts traffic.
    pub async fn ensure_admin(&self, name: &str, password: &str) -> Result<bool, DomainError> {
        let existing = self
            .users
            .find_by_role(Role::Admin)
            .await
            .map_err(Self::map_repository_error)?;
        if existing.is_some() {
            return Ok(false);
        }

        let digest = self
            .hasher
            .hash(password)
            .map_err(|err| DomainError::internal(err.to_string()))?;
        let admin = User::new(name, digest, Role::Admin);
        self.users
            .save(&admin)
            .await
            .map_err(Self::map_repository_error)?;
        info!(user_id = %admin.id, "bootstrap admin created");
        Ok(true)
    }
}
