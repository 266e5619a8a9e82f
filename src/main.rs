//! Ireizo API
//!
//! Read-only lookup of Irei memorial records from the names docstore, joined
//! with the DDR objects of the linked person.

mod api;
mod config;
mod ddr;
mod docstore;
mod errors;
mod models;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use ddr::DdrClient;
use docstore::Docstore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub docstore: Arc<Docstore>,
    pub ddr: Arc<DdrClient>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the upstream clients described by the configuration.
    pub fn from_config(config: Config) -> Result<Self, reqwest::Error> {
        let docstore = Docstore::new(&config.docstore_host, config.docstore_timeout)?;
        let ddr = DdrClient::new(
            &config.ddr_ui_url,
            &config.ddr_api_url,
            config.ddr_credentials.clone(),
            config.ddr_api_timeout,
        )?;

        Ok(Self {
            docstore: Arc::new(docstore),
            ddr: Arc::new(ddr),
            config: Arc::new(config),
        })
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
    }

    let state = AppState::from_config(config)?;

    tracing::info!("Starting Ireizo API");
    tracing::info!(
        "Docstore: {} (index {})",
        state.config.docstore_host,
        state.docstore.index()
    );
    tracing::info!("DDR API: {}", state.config.ddr_api_url);
    tracing::info!("Bind address: {}", state.config.bind_addr);

    if state.config.ddr_credentials.is_none() {
        tracing::info!("No DDR API credentials configured, querying anonymously");
    }

    let bind_addr = state.config.bind_addr;
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // Public read-only API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Versioned API; record paths are matched with and without a trailing slash
    let api_routes = Router::new()
        .route("/api/1.0", get(api::api_index))
        .route("/api/1.0/", get(api::api_index))
        .route("/api/1.0/{object_id}", get(api::get_ireirecord))
        .route("/api/1.0/{object_id}/", get(api::get_ireirecord));

    Router::new()
        .route("/", get(api::api_index))
        .route("/health", get(health_check))
        .merge(api_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
