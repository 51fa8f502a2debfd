//! Admin authorization middleware.

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::debug;

use common::{bearer_token, AppError};
use domain::UserRecord;

use crate::state::AppState;

/// Admin resolved from the bearer token.
#[derive(Debug, Clone)]
pub struct CurrentAdmin {
    /// Token forwarded to the backend on every call
    pub token: String,
    pub record: UserRecord,
}

/// Require a token the backend accepts as a superuser credential.
pub async fn admin_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?.to_string();

    let session = state.backend.verify_admin(&token).await?;
    debug!("Admin {:?} authorized", session.record_id());

    request.extensions_mut().insert(CurrentAdmin {
        token,
        record: session.record,
    });

    Ok(next.run(request).await)
}
