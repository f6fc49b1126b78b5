//! Users API - REST server

use axum_helpers::server::{create_production_app, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;

use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    info!(
        require_existing_profile = config.users.validation.require_existing_profile,
        require_unique_email = config.users.validation.require_unique_email,
        seed_demo_data = config.users.seed_demo_data,
        "Loaded users configuration"
    );

    let api_routes = api::routes(&config);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes, &config.server)?;
    let app = router.merge(health_router(config.app));

    info!("Starting Users API on port {}", config.server.port);

    create_production_app(app, &config.server, Duration::from_secs(30), async {
        info!("Shutting down: in-memory store dropped with the process");
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
