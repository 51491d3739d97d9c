use std::env;
use std::sync::Arc;

use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use payroll_engine::repository::InMemoryEmployeeRepository;

const DEFAULT_CONFIG_DIR: &str = "./config/idn";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Initialise the tracing subscriber.
///
/// Honours `RUST_LOG` when set and falls back to `info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config_dir = env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let bind_addr = env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.into());

    let config = ConfigLoader::load(&config_dir).inspect_err(|err| {
        error!(path = %config_dir, error = %err, "Failed to load configuration");
    })?;
    info!(
        path = %config_dir,
        regime = %config.regime().code,
        version = %config.regime().version,
        "Configuration loaded"
    );

    let state = AppState::new(
        config_dir,
        config,
        Arc::new(InMemoryEmployeeRepository::default()),
    );

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Payroll server listening");
    axum::serve(listener, create_router(state)).await?;

    Ok(())
}
