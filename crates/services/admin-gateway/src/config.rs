//! Admin gateway configuration.

use common::{BackendConfig, ServerConfig};

/// Default listen port of the admin gateway
pub const DEFAULT_PORT: u16 = 3001;

/// Admin gateway configuration.
#[derive(Debug, Clone)]
pub struct AdminGatewayConfig {
    pub backend: BackendConfig,
    pub server: ServerConfig,
}

impl AdminGatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            backend: BackendConfig::from_env(),
            server: ServerConfig::from_env("ADMIN_GATEWAY", DEFAULT_PORT),
        }
    }
}

impl Default for AdminGatewayConfig {
    fn default() -> Self {
        Self {
            backend: BackendConfig::default(),
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: DEFAULT_PORT,
            },
        }
    }
}
