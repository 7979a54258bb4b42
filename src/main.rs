//! Storefront API server.
//!
//! 1. Reads [`Config`] from the environment.
//! 2. Starts the [`StoreSystem`] and seeds access control.
//! 3. Serves the router until Ctrl-C, then stops every actor.

use storefront::config::Config;
use storefront::http;
use storefront::lifecycle::{seed_access_control, setup_tracing, StoreSystem};
use storefront::payment::gateway_for;
use storefront::state::AppState;
use tracing::{error, info};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Could not listen for Ctrl-C");
    }
    info!("Shutdown requested");
}

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = Config::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        e.to_string()
    })?;
    info!(?config, "Starting storefront");

    let system = StoreSystem::start(config.channel_capacity, config.pricing);
    let report = seed_access_control(&system.repositories, config.admin.as_ref())
        .await
        .map_err(|e| e.to_string())?;
    info!(
        permissions_created = report.permissions_created,
        admin_role = %report.admin_role,
        "Access control ready"
    );

    let payments = gateway_for(config.stripe_secret_key.as_deref());
    let state = AppState::new(system.repositories.clone(), &config, payments).map_err(|e| {
        error!(error = %e, "Image storage unavailable");
        e.to_string()
    })?;
    let app = http::router(state);

    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .map_err(|e| format!("Failed to bind {}: {e}", config.addr))?;
    info!(addr = %config.addr, "Listening");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;
    if let Err(e) = served {
        error!(error = %e, "Server error");
    }

    // the router, and every client clone in it, is gone once serve returns
    system.shutdown().await.map_err(|e| e.to_string())?;
    info!("Storefront stopped");
    Ok(())
}
