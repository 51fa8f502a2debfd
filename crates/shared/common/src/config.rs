//! Shared configuration structures.

use std::env;
use std::net::{AddrParseError, IpAddr, SocketAddr};

use domain::{SUPERUSERS_COLLECTION, USERS_COLLECTION};
use serde::{Deserialize, Serialize};

/// Default backend address
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:8090";

/// Backend (PocketBase) connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendConfig {
    /// Base URL of the backend, e.g. "http://127.0.0.1:8090"
    pub url: String,
    /// Auth collection holding user records
    pub users_collection: String,
    /// Auth collection holding admin credentials
    pub admin_collection: String,
}

impl BackendConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            url: env::var("POCKETBASE_URL").unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string()),
            users_collection: env::var("USERS_COLLECTION")
                .unwrap_or_else(|_| USERS_COLLECTION.to_string()),
            admin_collection: env::var("ADMIN_COLLECTION")
                .unwrap_or_else(|_| SUPERUSERS_COLLECTION.to_string()),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BACKEND_URL.to_string(),
            users_collection: USERS_COLLECTION.to_string(),
            admin_collection: SUPERUSERS_COLLECTION.to_string(),
        }
    }
}

/// Listen address of one gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Host address to bind
    pub host: String,
    /// Port to listen on
    pub port: u16,
}

impl ServerConfig {
    /// Load `<PREFIX>_HOST` / `<PREFIX>_PORT`, falling back to `default_port`.
    pub fn from_env(prefix: &str, default_port: u16) -> Self {
        Self {
            host: env::var(format!("{prefix}_HOST")).unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var(format!("{prefix}_PORT"))
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port),
        }
    }

    /// Socket address to bind. The host must be an IP literal; IPv6 hosts
    /// may be given with or without brackets.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        let host = self.host.trim_start_matches('[').trim_end_matches(']');
        let ip: IpAddr = host.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
