//! In-memory record store adapters.
//!
//! The domain treats storage as an opaque fetch/save record store, so the
//! shipped adapter keeps records in maps behind an async `RwLock`. Saves
//! are atomic per record; there are no transactions.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::pet::Pet;
use crate::domain::ports::{PetRepository, RepositoryError, UserRepository};
use crate::domain::user::{Role, User};

/// User records keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    records: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|user| user.name == name)
            .cloned())
    }

    async fn find_by_role(&self, role: Role) -> Result<Option<User>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .find(|user| user.role == role)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn save(&self, user: &User) -> Result<(), RepositoryError> {
        self.records.write().await.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<User>, RepositoryError> {
        Ok(self.records.write().await.remove(&id))
    }
}

/// Pet records keyed by identifier.
#[derive(Debug, Default)]
pub struct InMemoryPetRepository {
    records: RwLock<HashMap<Uuid, Pet>>,
}

impl InMemoryPetRepository {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PetRepository for InMemoryPetRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.records.read().await.get(&id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Pet>, RepositoryError> {
        Ok(self.records.read().await.values().cloned().collect())
    }

    async fn list_by_owner(&self, owner_id: Uuid) -> Result<Vec<Pet>, RepositoryError> {
        Ok(self
            .records
            .read()
            .await
            .values()
            .filter(|pet| pet.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn save(&self, pet: &Pet) -> Result<(), RepositoryError> {
        self.records.write().await.insert(pet.id, pet.clone());
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<Option<Pet>, RepositoryError> {
        Ok(self.records.write().await.remove(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::{NewPet, Personality};

    fn pet_owned_by(owner_id: Uuid) -> Pet {
        let new_pet = NewPet::try_from_parts("Michi", "cat", "laser stare", Personality::Normal)
            .expect("valid payload");
        Pet::new(new_pet, owner_id)
    }

    #[tokio::test]
    async fn users_round_trip_and_delete() {
        let repo = InMemoryUserRepository::new();
        let user = User::new("ana", "digest", Role::User);
        repo.save(&user).await.expect("save succeeds");

        assert_eq!(
            repo.find_by_id(user.id).await.expect("find succeeds"),
            Some(user.clone())
        );
        assert_eq!(
            repo.find_by_name("ana").await.expect("find succeeds"),
            Some(user.clone())
        );
        assert!(
            repo.find_by_role(Role::Admin)
                .await
                .expect("find succeeds")
                .is_none()
        );

        let removed = repo.delete_by_id(user.id).await.expect("delete succeeds");
        assert_eq!(removed, Some(user.clone()));
        assert!(repo.find_by_id(user.id).await.expect("find").is_none());
    }

    #[tokio::test]
    async fn save_overwrites_the_existing_record() {
        let repo = InMemoryPetRepository::new();
        let mut pet = pet_owned_by(Uuid::new_v4());
        repo.save(&pet).await.expect("save succeeds");
        pet.hunger = 70;
        repo.save(&pet).await.expect("save succeeds");

        let fetched = repo
            .find_by_id(pet.id)
            .await
            .expect("find succeeds")
            .expect("record present");
        assert_eq!(fetched.hunger, 70);
    }

    #[tokio::test]
    async fn list_by_owner_filters() {
        let repo = InMemoryPetRepository::new();
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        repo.save(&pet_owned_by(alice)).await.expect("save");
        repo.save(&pet_owned_by(alice)).await.expect("save");
        repo.save(&pet_owned_by(bob)).await.expect("save");

        assert_eq!(
            repo.list_by_owner(alice).await.expect("list").len(),
            2
        );
        assert_eq!(repo.list_by_owner(bob).await.expect("list").len(), 1);
        assert_eq!(repo.list_all().await.expect("list").len(), 3);
    }
}
