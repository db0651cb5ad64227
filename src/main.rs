use std::env;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use trip_paperwork::api::{AppState, create_router};
use trip_paperwork::config::ConfigLoader;

const CONFIG_DIR_VAR: &str = "TRIP_PAPERWORK_CONFIG";
const DEFAULT_CONFIG_DIR: &str = "./config";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_dir = env::var(CONFIG_DIR_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let loader = ConfigLoader::load(&config_dir)?;
    let bind_addr = loader.config().server.bind_addr.clone();
    let state = AppState::load(loader)?;

    info!(
        config_dir = %config_dir,
        employees = state.rates().len(),
        output_dir = %state.config().output_dir.display(),
        "Loaded paperwork configuration"
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(bind_addr = %bind_addr, "Trip paperwork API listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
