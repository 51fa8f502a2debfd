//! Unified error handling for both gateways.
//!
//! Every handler failure ends up as an [`AppError`], rendered as
//! `{"error": "<message>"}` with the matching HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::DomainError;
use pocketbase::ClientError;
use serde::Serialize;
use thiserror::Error;

/// Application error types.
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("No token provided")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("User already exists")]
    UserExists,

    #[error("User not found")]
    UserNotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    /// Request rejected by the backend; carries the backend's message
    #[error("{0}")]
    BadRequest(String),

    // Backend errors
    #[error("Service unavailable")]
    ServiceUnavailable(String),

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingToken | AppError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AppError::InvalidToken => StatusCode::FORBIDDEN,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::UserExists | AppError::Validation(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::error!("Backend unavailable: {}", msg);
                "Backend service is unavailable".to_string()
            }
            _ => self.to_string(),
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorResponse {
            error: self.user_message(),
        };

        (status, Json(body)).into_response()
    }
}

// =============================================================================
// Backend Client Conversion
// =============================================================================

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status, message, ..
            } => match status.as_u16() {
                401 | 403 => AppError::InvalidToken,
                404 => AppError::UserNotFound,
                400..=499 => AppError::BadRequest(message),
                _ => AppError::ServiceUnavailable(format!("{status}: {message}")),
            },
            ClientError::Transport(e) => AppError::ServiceUnavailable(e.to_string()),
            ClientError::InvalidUrl(url) => AppError::Internal(format!("Invalid backend URL {url}")),
        }
    }
}

impl AppError {
    /// Map a failed create, update or delete.
    ///
    /// Any 4xx from the backend becomes a 400 carrying the backend's message.
    pub fn rejected_write(err: ClientError) -> Self {
        match err {
            ClientError::Api {
                status, message, ..
            } if status.is_client_error() => AppError::BadRequest(message),
            other => AppError::from(other),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => AppError::Validation(msg),
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        AppError::BadRequest(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
