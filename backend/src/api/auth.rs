//! Bearer-token extraction for authenticated handlers.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};

use crate::api::error::ApiError;
use crate::domain::{DomainError, Principal};
use crate::server::AppState;

/// Extractor verifying the `Authorization: Bearer` header and exposing the
/// caller's [`Principal`]. Handlers taking this extractor reject
/// unauthenticated requests with 401 before running.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser(pub Principal);

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| ApiError::from(DomainError::internal("application state missing")))?;

    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| DomainError::unauthorized("bearer token required"))?;
    let value = header
        .to_str()
        .map_err(|_| DomainError::unauthorized("malformed authorization header"))?;
    let token = value
        .strip_prefix("Bearer ")
        .ok_or_else(|| DomainError::unauthorized("bearer token required"))?;

    let principal = state
        .tokens
        .verify(token)
        .map_err(|_| DomainError::unauthorized("invalid or expired token"))?;
    Ok(AuthenticatedUser(principal))
}
