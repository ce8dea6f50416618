//! Switchboard REST API
//!
//! HTTP API layer for Switchboard, built with Axum.
//!
//! # Endpoints
//!
//! ## Templates
//! - `GET /api/v1/templates` - List all templates
//! - `POST /api/v1/templates` - Create a template
//! - `POST /api/v1/templates/extract` - List the placeholders in a message
//! - `GET /api/v1/templates/:id` - Get a template
//! - `DELETE /api/v1/templates/:id` - Delete a template
//! - `POST /api/v1/templates/:id/preview` - Render a template with values
//! - `POST /api/v1/render` - Render an unsaved message
//!
//! ## Settings
//! - `GET /api/v1/settings` - Connection status and masked credentials
//! - `PUT /api/v1/settings` - Save credentials
//! - `DELETE /api/v1/settings` - Disconnect
//! - `POST /api/v1/settings/test` - Test a connection
//! - `PUT /api/v1/settings/notifications` - Toggle a notification
//!
//! ## Chat
//! - `GET /api/v1/chat/contacts` - List or search contacts
//! - `POST /api/v1/chat/contacts/:id/select` - Select a contact
//! - `GET /api/v1/chat/contacts/:id/messages` - Get a transcript
//! - `POST /api/v1/chat/contacts/:id/messages` - Send a message
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard` - Messaging statistics
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use switchboard::api::{serve, AppState};
//! use switchboard::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default();
//!     let state = AppState::from_config(&config)?;
//!     serve(state, &config.api).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    http::HeaderValue,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Template routes
        .route(
            "/templates",
            get(routes::templates::list_templates).post(routes::templates::create_template),
        )
        .route("/templates/extract", post(routes::templates::extract))
        .route(
            "/templates/:id",
            get(routes::templates::get_template).delete(routes::templates::delete_template),
        )
        .route(
            "/templates/:id/preview",
            post(routes::templates::preview_template),
        )
        .route("/render", post(routes::templates::render))
        // Settings routes
        .route(
            "/settings",
            get(routes::settings::get_settings)
                .put(routes::settings::save_settings)
                .delete(routes::settings::disconnect),
        )
        .route("/settings/test", post(routes::settings::test_connection))
        .route(
            "/settings/notifications",
            put(routes::settings::update_notification),
        )
        // Chat routes
        .route("/chat/contacts", get(routes::chat::list_contacts))
        .route("/chat/contacts/:id/select", post(routes::chat::select_contact))
        .route(
            "/chat/contacts/:id/messages",
            get(routes::chat::list_messages).post(routes::chat::send_message),
        )
        // Dashboard routes
        .route("/dashboard", get(routes::dashboard::get_dashboard));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let cors = cors_layer(&state.config.cors_origins);
    let timeout = TimeoutLayer::new(state.config.request_timeout());

    // Create shared state
    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(timeout)
        .layer(cors)
        .with_state(shared_state)
}

/// CORS for the configured origins; an empty list allows any origin
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let background = state.clone();
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Switchboard API listening on {}", addr);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)));

    // Pending auto-replies and connection tests must not outlive the server
    background.begin_shutdown();
    result?;

    tracing::info!("Switchboard API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
