//! Inbound HTTP service.

pub mod discovery;
pub mod handlers;

use axum::Router;
use axum::routing::get;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::Config;
use crate::data_fetcher::{CourtNameResolver, SlotAggregator, UpstreamClient};
use crate::error::AppError;

/// State shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    pub aggregator: SlotAggregator,
    /// Days prefetched on the first slot request of each Bali day; 0 disables.
    pub warm_up_days: u32,
}

impl AppState {
    pub fn new(aggregator: SlotAggregator, warm_up_days: u32) -> Self {
        Self {
            aggregator,
            warm_up_days,
        }
    }

    /// Wires the upstream client, caches and aggregator from configuration.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let upstream = UpstreamClient::from_config(config)?;
        let aggregator = SlotAggregator::new(upstream, Arc::new(CourtNameResolver::new()));
        Ok(Self::new(aggregator, config.warm_up_days))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/slots", get(handlers::slots))
        .route("/clubs", get(handlers::clubs))
        .route("/tenants", get(handlers::tenants))
        .route("/availability", get(handlers::availability))
        .route("/resources", get(handlers::resources))
        .route("/discover-courts", get(handlers::discover))
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds `bind_address` and serves until Ctrl+C.
pub async fn serve(state: AppState, bind_address: &str) -> Result<(), AppError> {
    let addr: SocketAddr = bind_address
        .parse()
        .map_err(|e| AppError::config_error(format!("Invalid bind address '{bind_address}': {e}")))?;

    let handles = state.aggregator.warm_up(state.warm_up_days).await;
    info!("Warming up {} upcoming dates", handles.len());

    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => error!("Failed to listen for shutdown signal: {e}"),
    }
}
