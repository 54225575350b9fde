//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] generates the specification for the REST API: every HTTP
//! endpoint, the request/response schemas, and the bearer-token security
//! scheme. Swagger UI serves it in debug builds.

use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api;
use crate::domain;

/// Enrich the generated document with the bearer-token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "BearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Token issued by POST /login."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Virtual pet care API",
        description = "CRUD/REST interface for virtual pets: registration, \
                       login, and personality-modulated care actions."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        api::users::register,
        api::users::login,
        api::users::list_users,
        api::users::get_user,
        api::users::delete_user,
        api::pets::list_pets,
        api::pets::create_pet,
        api::pets::update_pet,
        api::pets::delete_pet,
        api::pets::care_for_pet,
        api::pets::life_status,
        api::health::ready,
        api::health::live,
    ),
    components(schemas(
        api::MessageResponse,
        api::error::ApiError,
        api::users::CredentialsPayload,
        api::users::UserResponse,
        api::users::RegisteredResponse,
        api::users::LoginResponse,
        api::pets::CreatePetRequest,
        api::pets::UpdatePetRequest,
        api::pets::PetResponse,
        api::pets::CareResponse,
        domain::Pet,
        domain::Personality,
        domain::Role,
        domain::ErrorCode,
    ))
)]
pub struct ApiDoc;
