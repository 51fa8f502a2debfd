//! Admin Gateway Library
//!
//! User CRUD for administrators under `/admin`. Admin tokens are checked
//! against the backend superuser collection and forwarded on every call.

pub mod clients;
pub mod config;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use std::sync::Arc;

use tower_http::trace::TraceLayer;
use tracing::info;

use pocketbase::PocketBase;

use crate::clients::PocketBaseUserBackend;
use crate::config::AdminGatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the gateway as an embedded component (for combined binary).
pub async fn run_embedded(host: &str, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = AdminGatewayConfig::from_env();
    config.server.host = host.to_string();
    config.server.port = port;

    run_server_with_config(config).await
}

/// Run the HTTP server with the given configuration.
pub async fn run_server_with_config(
    config: AdminGatewayConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = PocketBase::new(&config.backend.url)?;
    let backend = Arc::new(PocketBaseUserBackend::new(
        client,
        config.backend.users_collection.clone(),
        config.backend.admin_collection.clone(),
    ));
    info!(
        "Forwarding to backend at {} (users '{}', admins '{}')",
        config.backend.url, config.backend.users_collection, config.backend.admin_collection
    );

    let app = create_router(AppState::new(backend)).layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    info!("Admin gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
