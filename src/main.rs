//! SocialHub Server: social backend with online presence.
//!
//! Main entry point that loads configuration, initializes logging and
//! starts the HTTP server.

use tracing_subscriber::{EnvFilter, fmt};

use socialhub_core::config::{AppConfig, LogFormat};

#[tokio::main]
async fn main() {
    let env = std::env::var("SOCIALHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Starting SocialHub v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = socialhub_api::run_server(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.filter_directives()));

    match config.logging.format {
        LogFormat::Json => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        LogFormat::Pretty => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}
