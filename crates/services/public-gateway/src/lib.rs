//! Public Gateway Library
//!
//! HTTP API for registration, login and self-service account management.
//! Every operation is forwarded to the PocketBase `users` auth collection.

pub mod clients;
pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use pocketbase::PocketBase;

use crate::clients::PocketBaseAuthBackend;
use crate::config::PublicGatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = PublicGatewayConfig::from_env();
    config.server.host = host.to_string();
    config.server.port = port;

    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: PublicGatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    // Create backend client
    let client = PocketBase::new(&config.backend.url)?;
    let backend = Arc::new(PocketBaseAuthBackend::new(
        client,
        config.backend.users_collection.clone(),
        config.service_token.clone(),
    ));
    info!(
        "Forwarding to backend at {} (collection '{}')",
        config.backend.url, config.backend.users_collection
    );

    // Create app state
    let state = AppState::new(backend);

    // Build router
    let app = create_router(state).layer(TraceLayer::new_for_http());

    // Build address
    let addr = config.server.socket_addr()?;
    info!("Public gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
