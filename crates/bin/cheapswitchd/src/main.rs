//! # cheapswitchd — cheapswitch daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Construct the device connector and price source (adapters)
//! - Construct the schedule service, injecting the price source via its port
//! - Build the axum router and serve it
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer — no domain logic belongs here.

mod config;

use std::time::Duration;

use tracing_subscriber::EnvFilter;

use cheapswitch_adapter_http_axum::router;
use cheapswitch_adapter_http_axum::state::AppState;
use cheapswitch_adapter_prices_http::HttpPriceSource;
use cheapswitch_adapter_shelly_rpc::ShellyConnector;
use cheapswitch_app::services::schedule_service::{ScheduleService, ServiceSettings};

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    let tz = config.timezone()?;

    // Adapters
    let device_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.device.timeout_secs))
        .build()?;
    let prices_client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.prices.timeout_secs))
        .build()?;
    let connector = ShellyConnector::new(device_client);
    let prices = HttpPriceSource::new(
        prices_client,
        config.prices.url.clone(),
        config.prices.token.clone(),
    );

    // Services
    let mut settings = ServiceSettings::new(tz, config.server.port);
    settings.advertise_host = config.server.advertise_host;
    settings.default_hours = config.schedule.hours;
    settings.default_dark_hours = config.schedule.dark_hours;
    let schedule_service = ScheduleService::new(prices, settings);

    // HTTP
    let state = AppState::new(
        schedule_service,
        connector,
        config.device.host.clone(),
        config.retry_policy(),
    );
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(
        %bind_addr,
        %tz,
        device = config.device.host.as_deref().unwrap_or("<per request>"),
        prices = %config.prices.url,
        "cheapswitchd listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cheapswitchd stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
