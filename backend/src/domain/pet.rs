//! Pet entity, personality trait, and the death invariant.
//!
//! Stat bounds and the death predicate live here; the care transitions that
//! mutate stats live in [`crate::domain::care`].

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Inclusive bounds for health, happiness, hunger, and cleanliness.
pub const STAT_MIN: i32 = 0;
/// Upper bound shared by every stat.
pub const STAT_MAX: i32 = 100;
/// Lower bound for sleep debt; crossing it is fatal.
pub const SLEEP_MIN: i32 = -50;

/// Fixed personality trait modulating the magnitude of care transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Personality {
    /// Baseline magnitudes.
    #[default]
    Normal,
    /// Recovers more sleep, gains less happiness from play.
    Lazy,
    /// Gains more happiness from play, recovers less sleep.
    Playful,
    /// Gains less happiness from feeding and caressing.
    Sad,
    /// Loses happiness when bathed.
    Grumpy,
}

impl fmt::Display for Personality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Normal => "normal",
            Self::Lazy => "lazy",
            Self::Playful => "playful",
            Self::Sad => "sad",
            Self::Grumpy => "grumpy",
        };
        f.write_str(label)
    }
}

/// Virtual pet with numeric well-being attributes.
///
/// ## Invariants
/// - `health`, `happiness`, `hunger`, `cleanliness` stay within
///   `[STAT_MIN, STAT_MAX]`; `sleep` within `[SLEEP_MIN, STAT_MAX]`.
///   [`Pet::settle`] re-establishes the bounds after any mutation.
/// - `is_dead` is monotonic: derived from the vitals, persisted once true,
///   and never reset by any action or update.
/// - `owner_id` is immutable after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pet {
    /// Stable pet identifier, assigned at creation.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Free-text species label.
    pub species: String,
    /// Free-text special-power label.
    pub super_power: String,
    /// Identifier of the owning user.
    pub owner_id: Uuid,
    /// Personality trait.
    pub personality: Personality,
    /// Health, 0..=100.
    pub health: i32,
    /// Happiness, 0..=100.
    pub happiness: i32,
    /// Sleep debt, -50..=100. Higher means more tired.
    pub sleep: i32,
    /// Hunger, 0..=100. Higher means hungrier.
    pub hunger: i32,
    /// Cleanliness, 0..=100.
    pub cleanliness: i32,
    /// Terminal flag; once true the pet is immutable.
    pub is_dead: bool,
}

impl Pet {
    /// Create a pet in the well-rested starting state.
    pub fn new(new_pet: NewPet, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: new_pet.name,
            species: new_pet.species,
            super_power: new_pet.super_power,
            owner_id,
            personality: new_pet.personality,
            health: STAT_MAX,
            happiness: STAT_MAX,
            sleep: 0,
            hunger: 0,
            cleanliness: STAT_MAX,
            is_dead: false,
        }
    }

    /// True when any vital attribute has crossed its fatal threshold.
    pub fn has_fatal_vitals(&self) -> bool {
        self.health <= 0
            || self.happiness <= 0
            || self.sleep <= SLEEP_MIN
            || self.hunger >= STAT_MAX
            || self.cleanliness <= 0
    }

    /// Clamp every stat into its bounds and derive the death flag.
    ///
    /// The flag only ever transitions from alive to dead here; a pet that
    /// is already dead stays dead regardless of its stats.
    pub fn settle(&mut self) {
        self.health = self.health.clamp(STAT_MIN, STAT_MAX);
        self.happiness = self.happiness.clamp(STAT_MIN, STAT_MAX);
        self.sleep = self.sleep.clamp(SLEEP_MIN, STAT_MAX);
        self.hunger = self.hunger.clamp(STAT_MIN, STAT_MAX);
        self.cleanliness = self.cleanliness.clamp(STAT_MIN, STAT_MAX);
        if self.has_fatal_vitals() {
            self.is_dead = true;
        }
    }
}

/// Validation errors for pet creation payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PetValidationError {
    EmptyName,
    EmptySpecies,
    EmptySuperPower,
}

impl fmt::Display for PetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "pet name must not be empty"),
            Self::EmptySpecies => write!(f, "pet species must not be empty"),
            Self::EmptySuperPower => write!(f, "pet special power must not be empty"),
        }
    }
}

impl std::error::Error for PetValidationError {}

/// Validated pet-creation payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPet {
    name: String,
    species: String,
    super_power: String,
    personality: Personality,
}

impl NewPet {
    /// Validate the free-text labels and build a creation payload.
    pub fn try_from_parts(
        name: &str,
        species: &str,
        super_power: &str,
        personality: Personality,
    ) -> Result<Self, PetValidationError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PetValidationError::EmptyName);
        }
        let species = species.trim();
        if species.is_empty() {
            return Err(PetValidationError::EmptySpecies);
        }
        let super_power = super_power.trim();
        if super_power.is_empty() {
            return Err(PetValidationError::EmptySuperPower);
        }
        Ok(Self {
            name: name.to_owned(),
            species: species.to_owned(),
            super_power: super_power.to_owned(),
            personality,
        })
    }
}

/// Partial update applied to a live pet.
///
/// Fields left as `None` keep their current value. Stat overrides are
/// clamped and the death predicate re-evaluated after the merge, so an
/// update can kill a pet but never resurrect one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PetUpdate {
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

impl PetUpdate {
    /// Merge the provided fields into `pet`, then settle its stats.
    pub fn apply_to(&self, pet: &mut Pet) {
        if let Some(name) = &self.name {
            pet.name = name.clone();
        }
        if let Some(species) = &self.species {
            pet.species = species.clone();
        }
        if let Some(super_power) = &self.super_power {
            pet.super_power = super_power.clone();
        }
        if let Some(personality) = self.personality {
            pet.personality = personality;
        }
        if let Some(health) = self.health {
            pet.health = health;
        }
        if let Some(happiness) = self.happiness {
            pet.happiness = happiness;
        }
        if let Some(sleep) = self.sleep {
            pet.sleep = sleep;
        }
        if let Some(hunger) = self.hunger {
            pet.hunger = hunger;
        }
        if let Some(cleanliness) = self.cleanliness {
            pet.cleanliness = cleanliness;
        }
        pet.settle();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample() -> Pet {
        let new_pet = NewPet::try_from_parts("Michi", "cat", "laser stare", Personality::Normal)
            .expect("valid payload");
        Pet::new(new_pet, Uuid::new_v4())
    }

    #[test]
    fn new_pet_starts_healthy() {
        let pet = sample();
        assert_eq!(pet.health, 100);
        assert_eq!(pet.happiness, 100);
        assert_eq!(pet.sleep, 0);
        assert_eq!(pet.hunger, 0);
        assert_eq!(pet.cleanliness, 100);
        assert!(!pet.is_dead);
    }

    #[rstest]
    #[case("", "cat", "x", PetValidationError::EmptyName)]
    #[case("Michi", "  ", "x", PetValidationError::EmptySpecies)]
    #[case("Michi", "cat", "", PetValidationError::EmptySuperPower)]
    fn creation_rejects_blank_labels(
        #[case] name: &str,
        #[case] species: &str,
        #[case] super_power: &str,
        #[case] expected: PetValidationError,
    ) {
        let err = NewPet::try_from_parts(name, species, super_power, Personality::Normal)
            .expect_err("blank labels must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn settle_clamps_all_stats() {
        let mut pet = sample();
        pet.health = 180;
        pet.happiness = -5;
        pet.sleep = -90;
        pet.hunger = 400;
        pet.cleanliness = -1;
        pet.settle();
        assert_eq!(pet.health, 100);
        assert_eq!(pet.happiness, 0);
        assert_eq!(pet.sleep, -50);
        assert_eq!(pet.hunger, 100);
        assert_eq!(pet.cleanliness, 0);
    }

    #[rstest]
    #[case::zero_health(|p: &mut Pet| p.health = 0)]
    #[case::zero_happiness(|p: &mut Pet| p.happiness = 0)]
    #[case::exhausted(|p: &mut Pet| p.sleep = -50)]
    #[case::starving(|p: &mut Pet| p.hunger = 100)]
    #[case::filthy(|p: &mut Pet| p.cleanliness = 0)]
    fn fatal_vitals_mark_death(#[case] mutate: fn(&mut Pet)) {
        let mut pet = sample();
        mutate(&mut pet);
        pet.settle();
        assert!(pet.is_dead);
    }

    #[test]
    fn settle_never_resurrects() {
        let mut pet = sample();
        pet.is_dead = true;
        pet.settle();
        assert!(pet.is_dead, "healthy stats must not clear the flag");
    }

    #[test]
    fn update_merges_only_provided_fields() {
        let mut pet = sample();
        let update = PetUpdate {
            name: Some("Firulais".into()),
            hunger: Some(55),
            ..PetUpdate::default()
        };
        update.apply_to(&mut pet);
        assert_eq!(pet.name, "Firulais");
        assert_eq!(pet.species, "cat");
        assert_eq!(pet.hunger, 55);
    }

    #[test]
    fn update_can_kill_via_stat_override() {
        let mut pet = sample();
        let update = PetUpdate {
            health: Some(-20),
            ..PetUpdate::default()
        };
        update.apply_to(&mut pet);
        assert_eq!(pet.health, 0);
        assert!(pet.is_dead);
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let pet = sample();
        let json = serde_json::to_value(&pet).expect("serializable");
        assert!(json.get("superPower").is_some());
        assert!(json.get("ownerId").is_some());
        assert!(json.get("isDead").is_some());
    }
}
