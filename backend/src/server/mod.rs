//! Application state wiring and route configuration.

pub mod config;

pub use self::config::AppConfig;

use std::sync::Arc;

use actix_web::web;

use crate::api;
use crate::domain::ports::TokenService;
use crate::domain::{PetService, UserService};
use crate::outbound::{
    Argon2PasswordHasher, InMemoryPetRepository, InMemoryUserRepository, JwtTokenService,
};

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// User lifecycle service.
    pub users: UserService,
    /// Pet CRUD and care service.
    pub pets: PetService,
    /// Token verifier used by the bearer extractor.
    pub tokens: Arc<dyn TokenService>,
}

impl AppState {
    /// Wire the services against the in-memory record store.
    pub fn in_memory(config: &AppConfig) -> Self {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&config.jwt_secret));
        let users = UserService::new(
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(Argon2PasswordHasher::default()),
            tokens.clone(),
            config.token_ttl,
        );
        let pets = PetService::new(Arc::new(InMemoryPetRepository::new()));
        Self {
            users,
            pets,
            tokens,
        }
    }
}

/// Register every HTTP route on the given service config.
///
/// The caller supplies `web::Data<AppState>` and
/// `web::Data<api::health::HealthState>` as app data.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(api::users::register)
        .service(api::users::login)
        .service(api::users::list_users)
        .service(api::users::get_user)
        .service(api::users::delete_user)
        .service(api::pets::list_pets)
        .service(api::pets::create_pet)
        .service(api::pets::update_pet)
        .service(api::pets::delete_pet)
        .service(api::pets::life_status)
        .service(api::pets::care_for_pet)
        .service(api::health::ready)
        .service(api::health::live);
}
