//! Backend client errors.

use reqwest::{Response, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors returned by the backend client.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The backend answered with a non-success status
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        /// Per-field validation details, keyed by field name
        data: Map<String, Value>,
    },

    /// The request never produced a usable response
    #[error("Backend request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The configured backend URL cannot address an API path
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// Error body as sent by the backend.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Map<String, Value>,
}

impl ClientError {
    /// Build an API error from a failed response, tolerating non-JSON bodies.
    pub(crate) async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.bytes().await.unwrap_or_default();

        let (message, data) = match serde_json::from_slice::<ApiErrorBody>(&body) {
            Ok(parsed) if !parsed.message.is_empty() => (parsed.message, parsed.data),
            Ok(parsed) => (default_message(status), parsed.data),
            Err(_) => (default_message(status), Map::new()),
        };

        ClientError::Api {
            status,
            message,
            data,
        }
    }

    /// HTTP status of an API error.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Validation code the backend attached to `field`, e.g. `validation_not_unique`.
    pub fn field_code(&self, field: &str) -> Option<&str> {
        match self {
            ClientError::Api { data, .. } => data
                .get(field)
                .and_then(|detail| detail.get("code"))
                .and_then(Value::as_str),
            _ => None,
        }
    }
}

fn default_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Unexpected backend response")
        .to_string()
}

/// Result type alias
pub type ClientResult<T> = Result<T, ClientError>;
