//! User service entry-point: reads settings, connects the store, then serves
//! the REST endpoints.

use std::process::ExitCode;

use actix_web::web;
use mockable::DefaultEnv;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use user_service::inbound::http::health::HealthState;
use user_service::server::{ServerConfig, connect_user_service, create_server};
use user_service::settings::Settings;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "user service stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env(&DefaultEnv::new())?;
    let users = connect_user_service(&settings).await?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(
        health_state.clone(),
        ServerConfig::new(settings.bind_addr, users),
    )?;
    server.await?;
    health_state.mark_unhealthy();
    Ok(())
}
