//! Pet API handlers: CRUD, care actions, and the life-status snapshot.

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::MessageResponse;
use crate::api::auth::AuthenticatedUser;
use crate::api::error::ApiResult;
use crate::domain::{CareAction, DomainError, NewPet, Personality, Pet, PetUpdate};
use crate::server::AppState;

/// Pet creation payload.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePetRequest {
    #[schema(example = "Michi")]
    pub name: String,
    #[schema(example = "cat")]
    pub species: String,
    #[schema(example = "laser stare")]
    pub super_power: String,
    /// Defaults to `normal` when omitted.
    pub personality: Option<Personality>,
}

/// Partial pet update; omitted fields keep their current value.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePetRequest {
    pub name: Option<String>,
    pub species: Option<String>,
    pub super_power: Option<String>,
    pub personality: Option<Personality>,
    pub health: Option<i32>,
    pub happiness: Option<i32>,
    pub sleep: Option<i32>,
    pub hunger: Option<i32>,
    pub cleanliness: Option<i32>,
}

impl From<UpdatePetRequest> for PetUpdate {
    fn from(value: UpdatePetRequest) -> Self {
        Self {
            name: value.name,
            species: value.species,
            super_power: value.super_power,
            personality: value.personality,
            health: value.health,
            happiness: value.happiness,
            sleep: value.sleep,
            hunger: value.hunger,
            cleanliness: value.cleanliness,
        }
    }
}

/// Envelope returned by pet mutations.
#[derive(Debug, Serialize, ToSchema)]
pub struct PetResponse {
    pub message: String,
    pub pet: Pet,
}

/// Envelope returned by care actions; `warning` only appears on the
/// overfeeding branch.
#[derive(Debug, Serialize, ToSchema)]
pub struct CareResponse {
    pub message: String,
    pub pet: Pet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// List pets: admins see all, regular users only their own.
#[utoipa::path(
    get,
    path = "/pets",
    responses(
        (status = 200, description = "Pets visible to the caller", body = [Pet]),
        (status = 401, description = "Missing or invalid token")
    ),
    tags = ["pets"]
)]
#[get("/pets")]
pub async fn list_pets(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
) -> ApiResult<HttpResponse> {
    let pets = state.pets.list(auth.0).await?;
    Ok(HttpResponse::Ok().json(pets))
}

/// Create a pet owned by the caller.
#[utoipa::path(
    post,
    path = "/pets",
    request_body = CreatePetRequest,
    responses(
        (status = 201, description = "Pet created", body = PetResponse),
        (status = 400, description = "Missing fields")
    ),
    tags = ["pets"]
)]
#[post("/pets")]
pub async fn create_pet(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    body: web::Json<CreatePetRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let new_pet = NewPet::try_from_parts(
        &body.name,
        &body.species,
        &body.super_power,
        body.personality.unwrap_or_default(),
    )
    .map_err(|err| DomainError::invalid_request(err.to_string()))?;
    let pet = state.pets.create(auth.0, new_pet).await?;
    Ok(HttpResponse::Created().json(PetResponse {
        message: "pet created".into(),
        pet,
    }))
}

/// Update a pet. Owner or admin; dead pets are immutable.
#[utoipa::path(
    put,
    path = "/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet identifier")),
    request_body = UpdatePetRequest,
    responses(
        (status = 200, description = "Pet updated", body = PetResponse),
        (status = 400, description = "Pet is dead"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Pet not found")
    ),
    tags = ["pets"]
)]
#[put("/pets/{id}")]
pub async fn update_pet(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePetRequest>,
) -> ApiResult<HttpResponse> {
    let pet = state
        .pets
        .update(auth.0, path.into_inner(), body.into_inner().into())
        .await?;
    Ok(HttpResponse::Ok().json(PetResponse {
        message: "pet updated".into(),
        pet,
    }))
}

/// Delete a pet. Owner or admin.
#[utoipa::path(
    delete,
    path = "/pets/{id}",
    params(("id" = Uuid, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Pet deleted", body = MessageResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Pet not found")
    ),
    tags = ["pets"]
)]
#[delete("/pets/{id}")]
pub async fn delete_pet(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.pets.delete(auth.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "pet deleted".into(),
    }))
}

fn care_message(action: CareAction) -> &'static str {
    match action {
        CareAction::Sleep => "pet slept",
        CareAction::Play => "pet played",
        CareAction::Feed => "pet fed",
        CareAction::Bathe => "pet bathed",
        CareAction::Caress => "pet caressed",
        CareAction::Heal => "pet healed",
    }
}

/// Invoke a care action on a pet. Owner or admin.
#[utoipa::path(
    post,
    path = "/pets/{id}/{action}",
    params(
        ("id" = Uuid, Path, description = "Pet identifier"),
        ("action" = String, Path, description = "One of sleep, play, feed, bathe, caress, heal")
    ),
    responses(
        (status = 200, description = "Action applied", body = CareResponse),
        (status = 400, description = "Precondition unmet or pet is dead"),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Pet or action not found")
    ),
    tags = ["pets"]
)]
#[post("/pets/{id}/{action}")]
pub async fn care_for_pet(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<(Uuid, String)>,
) -> ApiResult<HttpResponse> {
    let (id, segment) = path.into_inner();
    let action = CareAction::from_segment(&segment)
        .ok_or_else(|| DomainError::not_found("unknown care action"))?;
    let outcome = state.pets.care(auth.0, id, action).await?;
    Ok(HttpResponse::Ok().json(CareResponse {
        message: care_message(action).into(),
        pet: outcome.pet,
        warning: outcome.warning.map(str::to_owned),
    }))
}

/// Life-status snapshot of a pet. Owner or admin.
#[utoipa::path(
    get,
    path = "/pets/{id}/vida",
    params(("id" = Uuid, Path, description = "Pet identifier")),
    responses(
        (status = 200, description = "Current snapshot", body = Pet),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Pet not found")
    ),
    tags = ["pets"]
)]
#[get("/pets/{id}/vida")]
pub async fn life_status(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    let pet = state.pets.life_status(auth.0, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(pet))
}
