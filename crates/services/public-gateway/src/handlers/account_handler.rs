//! Handlers acting on the caller's own session.

use axum::{
    extract::{Extension, State},
    response::Json,
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use utoipa::ToSchema;

use common::{AppResult, JsonBody};
use domain::{UserRecord, MSG_UPDATED, MSG_USER_DELETED};

use crate::handlers::auth_handler::{MessageResponse, TokenResponse};
use crate::middleware::CurrentSession;
use crate::state::AppState;

/// Fields to change on the caller's record
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UpdateUserDataRequest(pub Map<String, Value>);

/// Access check result
#[derive(Debug, Serialize, ToSchema)]
pub struct AccessResponse {
    #[serde(rename = "hasAccess")]
    pub has_access: bool,
}

/// Caller's user record
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDataResponse {
    pub data: UserRecord,
}

/// Update confirmation with the stored record
#[derive(Debug, Serialize, ToSchema)]
pub struct UpdatedUserResponse {
    pub message: String,
    pub data: UserRecord,
}

/// Create routes that require a session
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/verify_access", get(verify_access))
        .route("/user_data", get(get_user_data))
        .route("/update_user_data", put(update_user_data))
        .route("/refresh", post(refresh_token))
        .route("/unregister", delete(unregister))
}

/// Check that the bearer token grants access
#[utoipa::path(
    get,
    path = "/verify_access",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = AccessResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn verify_access(Extension(_session): Extension<CurrentSession>) -> Json<AccessResponse> {
    Json(AccessResponse { has_access: true })
}

/// Get the caller's user record
#[utoipa::path(
    get,
    path = "/user_data",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User record", body = UserDataResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_data(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
) -> AppResult<Json<UserDataResponse>> {
    let user = state
        .backend
        .get_user(&session.token, session.user_id()?)
        .await?;
    Ok(Json(UserDataResponse { data: user }))
}

/// Update fields on the caller's user record
#[utoipa::path(
    put,
    path = "/update_user_data",
    tag = "Account",
    security(("bearer_auth" = [])),
    request_body = UpdateUserDataRequest,
    responses(
        (status = 200, description = "Updated successfully", body = UpdatedUserResponse),
        (status = 400, description = "Backend rejected the update"),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn update_user_data(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
    JsonBody(UpdateUserDataRequest(fields)): JsonBody<UpdateUserDataRequest>,
) -> AppResult<Json<UpdatedUserResponse>> {
    let user = state
        .backend
        .update_user(&session.token, session.user_id()?, fields)
        .await?;

    Ok(Json(UpdatedUserResponse {
        message: MSG_UPDATED.to_string(),
        data: user,
    }))
}

/// Reissue the session token
#[utoipa::path(
    post,
    path = "/refresh",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "New token", body = TokenResponse),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn refresh_token(Extension(session): Extension<CurrentSession>) -> Json<TokenResponse> {
    Json(TokenResponse {
        token: session.refreshed_token,
    })
}

/// Delete the caller's account
#[utoipa::path(
    delete,
    path = "/unregister",
    tag = "Account",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "User deleted", body = MessageResponse),
        (status = 400, description = "Backend rejected the deletion"),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn unregister(
    Extension(session): Extension<CurrentSession>,
    State(state): State<AppState>,
) -> AppResult<Json<MessageResponse>> {
    let id = session.user_id()?;
    state.backend.delete_user(&session.token, id).await?;
    info!("Unregistered user {}", id);

    Ok(Json(MessageResponse::new(MSG_USER_DELETED)))
}
