//! Switchboard API Server
//!
//! Run with: cargo run --bin switchboard-api
//!
//! # Configuration
//!
//! Read from the first `config.toml` found in the user config directory,
//! `/etc/switchboard/` or the working directory. Environment variables
//! override file values:
//! - `SWITCHBOARD_DATA_DIR`: Data directory (default: platform local data dir)
//! - `SWITCHBOARD_IN_MEMORY`: Keep everything in memory (default: false)
//! - `SWITCHBOARD_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SWITCHBOARD_API_PORT`: Port to listen on (default: 8090)
//! - `SWITCHBOARD_AUTO_REPLY`: Simulate customer replies (default: true)
//! - `SWITCHBOARD_AUTO_REPLY_DELAY_MS`: Delay before a reply (default: 1000)
//! - `SWITCHBOARD_LOG_LEVEL`: Log level (default: info)
//! - `SWITCHBOARD_LOG_FORMAT`: `pretty` or `json` (default: pretty)
//! - `RUST_LOG`: Full filter directive, takes precedence over the log level

use switchboard::api::{serve, AppState};
use switchboard::config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_default();

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.filter_directive().into());

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!("Starting Switchboard API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        in_memory = config.storage.in_memory,
        auto_reply = config.chat.auto_reply_enabled,
        "Configuration loaded"
    );

    let state = AppState::from_config(&config)?;
    {
        let templates = state.templates.read().await;
        tracing::info!("Loaded {} templates", templates.len());
    }

    // Run server
    tracing::info!("Starting server on {}", config.api.addr());
    serve(state, &config.api).await?;

    tracing::info!("Switchboard API server stopped");
    Ok(())
}
