//! Session middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use common::{bearer_token, AppError, AppResult};
use domain::UserRecord;

use crate::state::AppState;

/// Session resolved from the caller's bearer token.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    /// Token as presented by the caller
    pub token: String,
    /// Token reissued by the backend while validating
    pub refreshed_token: String,
    pub record: UserRecord,
}

impl CurrentSession {
    /// Identifier of the authenticated user.
    pub fn user_id(&self) -> AppResult<&str> {
        self.record
            .id()
            .ok_or_else(|| AppError::internal("Auth record without id"))
    }
}

/// Middleware that validates the bearer token with the backend.
///
/// No token is a 401, a token the backend rejects is a 403.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.to_string();

    let session = state.backend.refresh(&token).await?;

    let current = CurrentSession {
        token,
        refreshed_token: session.token,
        record: session.record,
    };

    request.extensions_mut().insert(current);

    Ok(next.run(request).await)
}
