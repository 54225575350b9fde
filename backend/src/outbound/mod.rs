//! Driven adapters implementing the domain ports.

pub mod memory;
pub mod security;

pub use self::memory::{InMemoryPetRepository, InMemoryUserRepository};
pub use self::security::{Argon2PasswordHasher, JwtTokenService};
