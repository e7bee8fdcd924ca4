//! Clinic access-control server.
//!
//! Main entry point that wires the crates together and starts the server.

use tracing_subscriber::{EnvFilter, fmt};

use clinic_core::config::AppConfig;
use clinic_core::error::AppError;
use clinic_database::Repositories;

#[tokio::main]
async fn main() {
    let env = std::env::var("CLINIC_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config, &env).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig, env: &str) -> Result<(), AppError> {
    tracing::info!(
        "Starting clinic server v{} (env: {})",
        env!("CARGO_PKG_VERSION"),
        env
    );

    // ── Step 1: Persistence ──────────────────────────────────────
    tracing::info!(
        "Initializing repositories (provider: {:?})...",
        config.database.provider
    );
    let repos = Repositories::connect(&config.database).await?;
    tracing::info!("Repositories ready");

    // ── Step 2: HTTP server ──────────────────────────────────────
    clinic_api::run_server(config, repos).await?;

    tracing::info!("Server stopped");
    Ok(())
}
