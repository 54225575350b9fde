//! Environment-driven application configuration.

use std::env;
use std::net::SocketAddr;

use chrono::Duration;
use tracing::warn;
use uuid::Uuid;

/// Default bearer-token lifetime: two hours.
const DEFAULT_TOKEN_TTL_SECS: i64 = 2 * 60 * 60;

/// Application configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Socket address the HTTP server binds to.
    pub bind_addr: SocketAddr,
    /// Secret used to sign and verify bearer tokens.
    pub jwt_secret: Vec<u8>,
    /// Lifetime of issued bearer tokens.
    pub token_ttl: Duration,
    /// Login name for the bootstrap admin record.
    pub admin_name: String,
    /// Password for the bootstrap admin record.
    pub admin_password: String,
}

impl AppConfig {
    /// Read configuration from the environment.
    ///
    /// `JWT_SECRET` is required outside debug builds unless
    /// `AUTH_ALLOW_EPHEMERAL=1` opts into a process-local secret, which
    /// invalidates every token on restart.
    ///
    /// # Errors
    /// Fails when `BIND_ADDR` does not parse or when no usable token
    /// secret is available.
    pub fn from_env() -> std::io::Result<Self> {
        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".into())
            .parse::<SocketAddr>()
            .map_err(|err| std::io::Error::other(format!("invalid BIND_ADDR: {err}")))?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ => {
                let allow_dev = env::var("AUTH_ALLOW_EPHEMERAL").ok().as_deref() == Some("1");
                if cfg!(debug_assertions) || allow_dev {
                    warn!("JWT_SECRET not set; using ephemeral secret (dev only)");
                    [Uuid::new_v4().into_bytes(), Uuid::new_v4().into_bytes()].concat()
                } else {
                    return Err(std::io::Error::other(
                        "JWT_SECRET must be set in release builds",
                    ));
                }
            }
        };

        let token_ttl = env::var("TOKEN_TTL_SECS")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .map_or_else(
                || Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
                Duration::seconds,
            );

        let admin_name = env::var("ADMIN_NAME").unwrap_or_else(|_| "Admin".into());
        let admin_password = match env::var("ADMIN_PASSWORD") {
            Ok(password) if !password.is_empty() => password,
            _ => {
                warn!("ADMIN_PASSWORD not set; bootstrap admin uses the default password");
                "admin123".into()
            }
        };

        Ok(Self {
            bind_addr,
            jwt_secret,
            token_ttl,
            admin_name,
            admin_password,
        })
    }

    /// Fixed configuration for tests: loopback bind, static secret.
    pub fn for_tests() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
            jwt_secret: b"test-secret".to_vec(),
            token_ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            admin_name: "Admin".into(),
            admin_password: "admin123".into(),
        }
    }
}
