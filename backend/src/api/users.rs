//! User API handlers: registration, login, queries, deletion.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::MessageResponse;
use crate::api::auth::AuthenticatedUser;
use crate::api::error::ApiResult;
use crate::domain::{Credentials, DomainError, Role, User};
use crate::server::AppState;

/// Username/password payload shared by registration and login.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CredentialsPayload {
    /// Login name, unique across users.
    #[schema(example = "ana")]
    pub name: String,
    /// Plaintext password; hashed before storage.
    #[schema(example = "hunter2")]
    pub password: String,
}

impl CredentialsPayload {
    fn into_credentials(self) -> Result<Credentials, DomainError> {
        Credentials::try_from_parts(&self.name, &self.password)
            .map_err(|err| DomainError::invalid_request(err.to_string()))
    }
}

/// User record as exposed over the API; never carries the password digest.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    /// Stable user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub name: String,
    /// Authorization role.
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            role: user.role,
        }
    }
}

/// Envelope returned by registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredResponse {
    pub message: String,
    pub user: UserResponse,
}

/// Envelope returned by login.
#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    /// Signed bearer token, valid for two hours.
    pub token: String,
    pub user: UserResponse,
}

/// Register a new user.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CredentialsPayload,
    security([]),
    responses(
        (status = 201, description = "User registered", body = RegisteredResponse),
        (status = 400, description = "Missing fields or duplicate username")
    ),
    tags = ["users"]
)]
#[post("/users")]
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<CredentialsPayload>,
) -> ApiResult<HttpResponse> {
    let credentials = body.into_inner().into_credentials()?;
    let user = state.users.register(credentials).await?;
    Ok(HttpResponse::Created().json(RegisteredResponse {
        message: "user registered".into(),
        user: user.into(),
    }))
}

/// Authenticate and obtain a bearer token.
#[utoipa::path(
    post,
    path = "/login",
    request_body = CredentialsPayload,
    security([]),
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Invalid credentials")
    ),
    tags = ["users"]
)]
#[post("/login")]
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<CredentialsPayload>,
) -> ApiResult<HttpResponse> {
    let credentials = body.into_inner().into_credentials()?;
    let outcome = state.users.login(credentials).await?;
    Ok(HttpResponse::Ok().json(LoginResponse {
        token: outcome.token,
        user: outcome.user.into(),
    }))
}

/// List all users. Admin only.
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Administrator role required")
    ),
    tags = ["users"]
)]
#[get("/users")]
pub async fn list_users(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let users = state.users.list(auth.0).await?;
    let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(users))
}

/// Fetch a user by identifier. Self or admin.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserResponse),
        (status = 403, description = "Not the caller's record"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"]
)]
#[get("/users/{id}")]
pub async fn get_user(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let user = state.users.get(auth.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// Delete a user by identifier. Self or admin.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = Uuid, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 403, description = "Not the caller's record"),
        (status = 404, description = "User not found")
    ),
    tags = ["users"]
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.users.delete(auth.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "user deleted".into(),
    }))
}
