//! Public gateway configuration.

use std::env;

use common::{BackendConfig, ServerConfig};

/// Default listen port of the public gateway
pub const DEFAULT_PORT: u16 = 3000;

/// Public gateway configuration.
#[derive(Debug, Clone)]
pub struct PublicGatewayConfig {
    /// Backend connection
    pub backend: BackendConfig,
    /// Listen address
    pub server: ServerConfig,
    /// Privileged backend token used to check that a user exists before
    /// requesting a password reset. Lookups are skipped when unset.
    pub service_token: Option<String>,
}

impl PublicGatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            backend: BackendConfig::from_env(),
            server: ServerConfig::from_env("PUBLIC_GATEWAY", DEFAULT_PORT),
            service_token: env::var("POCKETBASE_SERVICE_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
        }
    }
}

impl Default for PublicGatewayConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
            service_token: None,
        }
    }
}
