//! Domain core: entities, care rules, services, and ports.
//!
//! Everything in this module is transport agnostic. Inbound adapters live
//! under [`crate::api`]; driven adapters under [`crate::outbound`].

pub mod auth;
pub mod care;
pub mod error;
pub mod pet;
pub mod pet_service;
pub mod ports;
pub mod user;
pub mod user_service;

pub use self::auth::{Credentials, CredentialsValidationError, Principal};
pub use self::care::{CareAction, CareError, CareOutcome, OVERFEED_WARNING};
pub use self::error::{DomainError, ErrorCode};
pub use self::pet::{NewPet, Personality, Pet, PetUpdate, PetValidationError};
pub use self::pet_service::PetService;
pub use self::user::{Role, User};
pub use self::user_service::{LoginOutcome, UserService};
