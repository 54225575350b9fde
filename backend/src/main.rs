//! Backend entry-point: wires REST endpoints, admin bootstrap, and OpenAPI docs.

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use backend::Trace;
use backend::api::health::HealthState;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::server::{AppConfig, AppState, routes};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = AppConfig::from_env()?;
    let state = AppState::in_memory(&config);

    // Bootstrap invariant: an admin record exists before traffic arrives.
    state
        .users
        .ensure_admin(&config.admin_name, &config.admin_password)
        .await
        .map_err(|err| std::io::Error::other(format!("admin bootstrap failed: {err}")))?;

    let health_state = web::Data::new(HealthState::new());
    let app_state = web::Data::new(state);
    // Clone for the server factory so the readiness probe stays accessible.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(app_state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(routes);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?;

    health_state.mark_ready();
    server.run().await
}
