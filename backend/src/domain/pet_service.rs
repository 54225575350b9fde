//! Pet services: CRUD and care orchestration over the record store.
//!
//! Each care action is a read-modify-write: fetch the snapshot, run the
//! pure rules in [`crate::domain::care`], persist the result. There is no
//! optimistic-concurrency check; concurrent actions on the same pet are
//! last-write-wins by design.

use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::auth::Principal;
use super::care::{CareAction, CareError, CareOutcome};
use super::error::DomainError;
use super::pet::{NewPet, Pet, PetUpdate};
use super::ports::{PetRepository, RepositoryError};

/// Application service over the pet record store.
#[derive(Clone)]
pub struct PetService {
    pets: Arc<dyn PetRepository>,
}

impl PetService {
    /// Create a new service with the given repository.
    pub fn new(pets: Arc<dyn PetRepository>) -> Self {
        Self { pets }
    }

    fn map_repository_error(error: RepositoryError) -> DomainError {
        DomainError::internal(format!("pet store failure: {error}"))
    }

    fn map_care_error(error: CareError) -> DomainError {
        DomainError::invalid_state(error.to_string())
    }

    /// Fetch a pet and run the ownership gate against it.
    async fn fetch_authorized(&self, principal: Principal, id: Uuid) -> Result<Pet, DomainError> {
        let pet = self
            .pets
            .find_by_id(id)
            .await
            .map_err(Self::map_repository_error)?
            .ok_or_else(|| DomainError::not_found("pet not found"))?;
        principal.authorize_owner(pet.owner_id)?;
        Ok(pet)
    }

    /// List pets: admins see all, regular users only their own.
    pub async fn list(&self, principal: Principal) -> Result<Vec<Pet>, DomainError> {
        let pets = if principal.is_admin() {
            self.pets.list_all().await
        } else {
            self.pets.list_by_owner(principal.id).await
        };
        pets.map_err(Self::map_repository_error)
    }

    /// Create a pet owned by the caller.
    #[instrument(skip_all, fields(owner_id = %principal.id))]
    pub async fn create(&self, principal: Principal, new_pet: NewPet) -> Result<Pet, DomainError> {
        let pet = Pet::new(new_pet, principal.id);
        self.pets
            .save(&pet)
            .await
            .map_err(Self::map_repository_error)?;
        info!(pet_id = %pet.id, "pet created");
        Ok(pet)
    }

    /// Merge an update into a live pet. Owner or admin.
    ///
    /// # Errors
    /// Rejects dead pets with an invalid-state error; the merge itself may
    /// still kill the pet through stat overrides.
    pub async fn update(
        &self,
        principal: Principal,
        id: Uuid,
        update: PetUpdate,
    ) -> Result<Pet, DomainError> {
        let mut pet = self.fetch_authorized(principal, id).await?;
        if pet.is_dead {
            return Err(DomainError::invalid_state("a dead pet cannot be modified"));
        }
        update.apply_to(&mut pet);
        self.pets
            .save(&pet)
            .await
            .map_err(Self::map_repository_error)?;
        Ok(pet)
    }

    /// Delete a pet. Owner or admin.
    pub async fn delete(&self, principal: Principal, id: Uuid) -> Result<(), DomainError> {
        // Fetch first so a stranger sees 403, not a silent delete.
        self.fetch_authorized(principal, id).await?;
        self.pets
            .delete_by_id(id)
            .await
            .map_err(Self::map_repository_error)?;
        info!(pet_id = %id, "pet deleted");
        Ok(())
    }

    /// Apply a care action and persist the outcome. Owner or admin.
    ///
    /// Persistence is a single best-effort save; a failed save after a
    /// valid mutation is surfaced but not rolled back.
    #[instrument(skip_all, fields(pet_id = %id, action = %action))]
    pub async fn care(
        &self,
        principal: Principal,
        id: Uuid,
        action: CareAction,
    ) -> Result<CareOutcome, DomainError> {
        let pet = self.fetch_authorized(principal, id).await?;
        let outcome = pet.apply(action).map_err(Self::map_care_error)?;
        self.pets
            .save(&outcome.pet)
            .await
            .map_err(Self::map_repository_error)?;
        if outcome.pet.is_dead && !pet.is_dead {
            info!(pet_id = %id, "pet died");
        }
        Ok(outcome)
    }

    /// Current life-status snapshot. Owner or admin.
    pub async fn life_status(&self, principal: Principal, id: Uuid) -> Result<Pet, DomainError> {
        self.fetch_authorized(principal, id).await
    }
}
