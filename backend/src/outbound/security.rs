//! Security adapters: Argon2 password hashing and HS256 bearer tokens.

use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher as _, PasswordVerifier as _, SaltString};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::auth::Principal;
use crate::domain::ports::{CredentialError, PasswordHasher, TokenError, TokenService};
use crate::domain::user::Role;

/// Argon2id hasher producing PHC-format digests with per-password salts.
#[derive(Default)]
pub struct Argon2PasswordHasher {
    argon: Argon2<'static>,
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, plaintext: &str) -> Result<String, CredentialError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|digest| digest.to_string())
            .map_err(|err| CredentialError::Hash {
                message: err.to_string(),
            })
    }

    fn verify(&self, plaintext: &str, digest: &str) -> Result<bool, CredentialError> {
        let parsed = PasswordHash::new(digest).map_err(|err| CredentialError::MalformedDigest {
            message: err.to_string(),
        })?;
        Ok(self
            .argon
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok())
    }
}

/// JWT claims carried by issued tokens.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User identifier.
    sub: Uuid,
    /// Authorization role.
    role: Role,
    /// Expiry as a Unix timestamp.
    exp: i64,
}

/// HS256 token service over a shared secret.
pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl JwtTokenService {
    /// Build issue/verify keys from the configured secret.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, principal: Principal, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: principal.id,
            role: principal.role,
            exp: (Utc::now() + ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            TokenError::Signing {
                message: err.to_string(),
            }
        })
    }

    fn verify(&self, token: &str) -> Result<Principal, TokenError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map_err(|_| TokenError::Invalid)?;
        Ok(Principal {
            id: data.claims.sub,
            role: data.claims.role,
        })
    }
}
