//! Inbound HTTP adapters: handlers, DTOs, and error mapping.

pub mod auth;
pub mod error;
pub mod health;
pub mod pets;
pub mod users;

pub use self::auth::AuthenticatedUser;
pub use self::error::{ApiError, ApiResult};

use serde::Serialize;
use utoipa::ToSchema;

/// Minimal success envelope for deletions.
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
