//! Care actions and the pet state-mutation rules.
//!
//! [`Pet::apply`] is the single entry point: given the current snapshot and
//! a requested action it validates the preconditions, computes the next
//! snapshot, and re-derives the death flag. It never touches storage.

use thiserror::Error;

use super::pet::{Personality, Pet};

/// Warning attached to the overfeeding branch of [`CareAction::Feed`].
pub const OVERFEED_WARNING: &str = "Overfeeding: health has dropped";

/// Fixed set of care actions a caller may invoke on a pet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CareAction {
    Sleep,
    Play,
    Feed,
    Bathe,
    Caress,
    Heal,
}

impl CareAction {
    /// URL segment naming this action on the HTTP surface.
    pub fn as_segment(&self) -> &'static str {
        match self {
            Self::Sleep => "sleep",
            Self::Play => "play",
            Self::Feed => "feed",
            Self::Bathe => "bathe",
            Self::Caress => "caress",
            Self::Heal => "heal",
        }
    }

    /// Parse an action from its URL segment.
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "sleep" => Some(Self::Sleep),
            "play" => Some(Self::Play),
            "feed" => Some(Self::Feed),
            "bathe" => Some(Self::Bathe),
            "caress" => Some(Self::Caress),
            "heal" => Some(Self::Heal),
            _ => None,
        }
    }
}

impl std::fmt::Display for CareAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_segment())
    }
}

/// Precondition failures raised before any attribute is mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CareError {
    /// The pet has died; no action may mutate it again.
    #[error("no further care is possible: the pet has died")]
    AlreadyDead,
    /// Play requires a rested, clean, and fed pet.
    #[error("cannot play: the pet is tired, dirty, or hungry")]
    TooWornOutToPlay,
    /// Sleep requires accumulated sleep debt.
    #[error("cannot sleep: the pet is already rested")]
    AlreadyRested,
}

/// Result of a successfully applied care action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CareOutcome {
    /// The updated snapshot, already settled and death-checked.
    pub pet: Pet,
    /// Warning raised by the overfeeding branch.
    pub warning: Option<&'static str>,
}

impl Pet {
    /// Apply a care action to this snapshot, returning the next one.
    ///
    /// Validation happens before any mutation, so a failed action leaves
    /// no partial change behind. The returned snapshot has every stat
    /// clamped into bounds and the death flag re-derived.
    ///
    /// # Errors
    /// [`CareError::AlreadyDead`] for any action on a dead pet, plus the
    /// action-specific precondition failures.
    pub fn apply(&self, action: CareAction) -> Result<CareOutcome, CareError> {
        let mut next = self.clone();
        // Feed skips the shared gate: instead of rejecting, a sated pet is
        // overfed and takes a health penalty. It still refuses dead pets
        // through its own check.
        let warning = if action == CareAction::Feed {
            next.feed()?
        } else {
            next.guard(action)?;
            match action {
                CareAction::Sleep => next.sleep_off_debt(),
                CareAction::Play => next.play(),
                CareAction::Bathe => next.bathe(),
                CareAction::Caress => next.caress(),
                CareAction::Heal => next.heal(),
                CareAction::Feed => unreachable!("feed handled above"),
            }
            None
        };
        next.settle();
        Ok(CareOutcome { pet: next, warning })
    }

    /// Shared precondition gate for every action except feed.
    fn guard(&self, action: CareAction) -> Result<(), CareError> {
        if self.is_dead {
            return Err(CareError::AlreadyDead);
        }
        match action {
            CareAction::Play if self.sleep > 80 || self.cleanliness < 20 || self.hunger > 80 => {
                Err(CareError::TooWornOutToPlay)
            }
            CareAction::Sleep if self.sleep <= 0 => Err(CareError::AlreadyRested),
            _ => Ok(()),
        }
    }

    fn sleep_off_debt(&mut self) {
        let recovered = match self.personality {
            Personality::Lazy => 30,
            Personality::Playful => 10,
            _ => 20,
        };
        // Sleeping never pushes the debt below zero, whatever the trait.
        self.sleep = (self.sleep - recovered).max(0);
        if self.sleep < 20 {
            self.happiness += 5;
        }
        if self.hunger > 80 || self.cleanliness < 20 {
            self.health -= 10;
        }
    }

    fn play(&mut self) {
        // Penalty is assessed against the pre-play stats.
        if self.hunger > 80 || self.cleanliness < 20 {
            self.health -= 10;
        }
        self.happiness += match self.personality {
            Personality::Playful => 20,
            Personality::Lazy => 5,
            _ => 10,
        };
        self.sleep += if self.personality == Personality::Lazy {
            20
        } else {
            10
        };
    }

    fn feed(&mut self) -> Result<Option<&'static str>, CareError> {
        if self.is_dead {
            return Err(CareError::AlreadyDead);
        }
        if self.happiness >= 100 || self.hunger == 0 {
            self.health -= 10;
            return Ok(Some(OVERFEED_WARNING));
        }
        if self.cleanliness < 20 {
            self.health -= 10;
        }
        self.hunger = (self.hunger - 30).max(0);
        self.happiness += self.affection_gain();
        Ok(None)
    }

    fn bathe(&mut self) {
        if self.hunger > 80 {
            self.health -= 10;
        }
        self.cleanliness = 100;
        if self.personality == Personality::Grumpy {
            self.happiness -= 10;
        }
    }

    fn caress(&mut self) {
        self.happiness += self.affection_gain();
    }

    fn heal(&mut self) {
        self.health += 20;
        self.happiness -= 10;
        self.cleanliness -= 15;
    }

    /// Happiness gained from feeding or caressing; sad pets gain less.
    fn affection_gain(&self) -> i32 {
        if self.personality == Personality::Sad {
            5
        } else {
            10
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::pet::{NewPet, SLEEP_MIN, STAT_MAX, STAT_MIN};
    use rstest::rstest;
    use uuid::Uuid;

    fn pet_with(personality: Personality) -> Pet {
        let new_pet = NewPet::try_from_parts("Michi", "cat", "laser stare", personality)
            .expect("valid payload");
        Pet::new(new_pet, Uuid::new_v4())
    }

    fn pet() -> Pet {
        pet_with(Personality::Normal)
    }

    #[rstest]
    #[case::lazy(Personality::Lazy, 60, 30)]
    #[case::playful(Personality::Playful, 60, 50)]
    #[case::normal(Personality::Normal, 60, 40)]
    #[case::sad(Personality::Sad, 60, 40)]
    fn sleep_recovers_by_personality(
        #[case] personality: Personality,
        #[case] debt: i32,
        #[case] expected: i32,
    ) {
        let mut subject = pet_with(personality);
        subject.sleep = debt;
        subject.happiness = 50;
        let outcome = subject.apply(CareAction::Sleep).expect("sleep succeeds");
        assert_eq!(outcome.pet.sleep, expected);
        // Debt stayed >= 20, so no happiness bonus.
        assert_eq!(outcome.pet.happiness, 50);
    }

    #[test]
    fn sleep_never_goes_below_zero_and_grants_rest_bonus() {
        let mut subject = pet_with(Personality::Lazy);
        subject.sleep = 10;
        subject.happiness = 50;
        let outcome = subject.apply(CareAction::Sleep).expect("sleep succeeds");
        assert_eq!(outcome.pet.sleep, 0);
        assert_eq!(outcome.pet.happiness, 55);
    }

    #[test]
    fn sleep_while_neglected_costs_health() {
        let mut subject = pet();
        subject.sleep = 40;
        subject.hunger = 90;
        let outcome = subject.apply(CareAction::Sleep).expect("sleep succeeds");
        assert_eq!(outcome.pet.health, 90);
    }

    #[test]
    fn sleep_when_rested_is_rejected() {
        let subject = pet(); // sleep == 0
        let err = subject.apply(CareAction::Sleep).expect_err("must reject");
        assert_eq!(err, CareError::AlreadyRested);
    }

    #[rstest]
    #[case::playful(Personality::Playful, 20, 10)]
    #[case::lazy(Personality::Lazy, 5, 20)]
    #[case::normal(Personality::Normal, 10, 10)]
    #[case::grumpy(Personality::Grumpy, 10, 10)]
    fn play_gains_by_personality(
        #[case] personality: Personality,
        #[case] happiness_gain: i32,
        #[case] sleep_gain: i32,
    ) {
        let mut subject = pet_with(personality);
        subject.happiness = 50;
        let outcome = subject.apply(CareAction::Play).expect("play succeeds");
        assert_eq!(outcome.pet.happiness, 50 + happiness_gain);
        assert_eq!(outcome.pet.sleep, sleep_gain);
    }

    #[rstest]
    #[case::tired(|p: &mut Pet| p.sleep = 81)]
    #[case::dirty(|p: &mut Pet| p.cleanliness = 19)]
    #[case::hungry(|p: &mut Pet| p.hunger = 90)]
    fn play_preconditions_reject(#[case] mutate: fn(&mut Pet)) {
        let mut subject = pet();
        mutate(&mut subject);
        let err = subject.apply(CareAction::Play).expect_err("must reject");
        assert_eq!(err, CareError::TooWornOutToPlay);
    }

    #[test]
    fn feed_reduces_hunger_and_cheers_up() {
        let mut subject = pet();
        subject.happiness = 50;
        subject.hunger = 40;
        let outcome = subject.apply(CareAction::Feed).expect("feed succeeds");
        assert_eq!(outcome.pet.hunger, 10);
        assert_eq!(outcome.pet.happiness, 60);
        assert!(outcome.warning.is_none());
    }

    #[test]
    fn feed_cheers_sad_pets_less() {
        let mut subject = pet_with(Personality::Sad);
        subject.happiness = 50;
        subject.hunger = 40;
        let outcome = subject.apply(CareAction::Feed).expect("feed succeeds");
        assert_eq!(outcome.pet.happiness, 55);
    }

    #[test]
    fn feed_clamps_hunger_at_zero() {
        let mut subject = pet();
        subject.happiness = 50;
        subject.hunger = 20;
        let outcome = subject.apply(CareAction::Feed).expect("feed succeeds");
        assert_eq!(outcome.pet.hunger, 0);
    }

    #[test]
    fn feed_while_dirty_costs_health() {
        let mut subject = pet();
        subject.happiness = 50;
        subject.hunger = 40;
        subject.cleanliness = 10;
        let outcome = subject.apply(CareAction::Feed).expect("feed succeeds");
        assert_eq!(outcome.pet.health, 90);
    }

    #[rstest]
    #[case::max_happiness(100, 50)]
    #[case::no_hunger(50, 0)]
    fn overfeeding_penalizes_health_with_warning(#[case] happiness: i32, #[case] hunger: i32) {
        let mut subject = pet();
        subject.happiness = happiness;
        subject.hunger = hunger;
        let outcome = subject.apply(CareAction::Feed).expect("feed still applies");
        assert_eq!(outcome.pet.health, 90);
        assert_eq!(outcome.warning, Some(OVERFEED_WARNING));
        // The sated stats themselves are untouched.
        assert_eq!(outcome.pet.happiness, happiness);
        assert_eq!(outcome.pet.hunger, hunger);
    }

    #[test]
    fn feed_rejects_dead_pets_through_its_own_check() {
        let mut subject = pet();
        subject.is_dead = true;
        subject.happiness = 50;
        subject.hunger = 40;
        let err = subject.apply(CareAction::Feed).expect_err("must reject");
        assert_eq!(err, CareError::AlreadyDead);
    }

    #[test]
    fn bathe_restores_cleanliness() {
        let mut subject = pet();
        subject.cleanliness = 5;
        let outcome = subject.apply(CareAction::Bathe).expect("bathe succeeds");
        assert_eq!(outcome.pet.cleanliness, 100);
        assert_eq!(outcome.pet.health, 100);
    }

    #[test]
    fn bathe_while_starving_costs_health() {
        let mut subject = pet();
        subject.hunger = 90;
        let outcome = subject.apply(CareAction::Bathe).expect("bathe succeeds");
        assert_eq!(outcome.pet.health, 90);
    }

    #[test]
    fn bathing_a_grumpy_pet_annoys_it() {
        let mut subject = pet_with(Personality::Grumpy);
        subject.happiness = 50;
        let outcome = subject.apply(CareAction::Bathe).expect("bathe succeeds");
        assert_eq!(outcome.pet.happiness, 40);
    }

    #[rstest]
    #[case::normal(Personality::Normal, 60)]
    #[case::sad(Personality::Sad, 55)]
    fn caress_cheers_up(#[case] personality: Personality, #[case] expected: i32) {
        let mut subject = pet_with(personality);
        subject.happiness = 50;
        let outcome = subject.apply(CareAction::Caress).expect("caress succeeds");
        assert_eq!(outcome.pet.happiness, expected);
    }

    #[test]
    fn heal_trades_comfort_for_health() {
        let mut subject = pet();
        subject.health = 90;
        let outcome = subject.apply(CareAction::Heal).expect("heal succeeds");
        assert_eq!(outcome.pet.health, 100, "clamped at the upper bound");
        assert_eq!(outcome.pet.happiness, 90);
        assert_eq!(outcome.pet.cleanliness, 85);
    }

    #[rstest]
    #[case(CareAction::Play)]
    #[case(CareAction::Bathe)]
    #[case(CareAction::Caress)]
    #[case(CareAction::Heal)]
    fn dead_pets_reject_every_action(#[case] action: CareAction) {
        let mut subject = pet();
        subject.is_dead = true;
        let err = subject.apply(action).expect_err("must reject");
        assert_eq!(err, CareError::AlreadyDead);
    }

    #[test]
    fn fatal_transition_marks_death_and_returns_snapshot() {
        let mut subject = pet();
        subject.happiness = 100;
        subject.health = 10;
        let outcome = subject.apply(CareAction::Feed).expect("overfeed applies");
        assert_eq!(outcome.pet.health, 0);
        assert!(outcome.pet.is_dead, "health reaching zero is fatal");
        // The corpse rejects the next action.
        let err = outcome.pet.apply(CareAction::Caress).expect_err("immutable");
        assert_eq!(err, CareError::AlreadyDead);
    }

    #[rstest]
    #[case(CareAction::Sleep)]
    #[case(CareAction::Play)]
    #[case(CareAction::Feed)]
    #[case(CareAction::Bathe)]
    #[case(CareAction::Caress)]
    #[case(CareAction::Heal)]
    fn all_actions_keep_stats_in_bounds(#[case] action: CareAction) {
        let mut subject = pet();
        subject.health = 1;
        subject.happiness = 99;
        subject.sleep = 50;
        subject.hunger = 70;
        subject.cleanliness = 30;
        if let Ok(outcome) = subject.apply(action) {
            let p = outcome.pet;
            assert!((STAT_MIN..=STAT_MAX).contains(&p.health));
            assert!((STAT_MIN..=STAT_MAX).contains(&p.happiness));
            assert!((SLEEP_MIN..=STAT_MAX).contains(&p.sleep));
            assert!((STAT_MIN..=STAT_MAX).contains(&p.hunger));
            assert!((STAT_MIN..=STAT_MAX).contains(&p.cleanliness));
        }
    }

    #[rstest]
    #[case("sleep", Some(CareAction::Sleep))]
    #[case("caress", Some(CareAction::Caress))]
    #[case("vida", None)]
    #[case("", None)]
    fn action_segments_round_trip(#[case] segment: &str, #[case] expected: Option<CareAction>) {
        assert_eq!(CareAction::from_segment(segment), expected);
        if let Some(action) = expected {
            assert_eq!(action.as_segment(), segment);
        }
    }
}
