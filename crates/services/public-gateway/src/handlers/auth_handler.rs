//! Registration, login and other token-less handlers.

use axum::{
    extract::State,
    http::HeaderMap,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use utoipa::ToSchema;
use validator::Validate;

use common::{bearer_token, AppError, AppResult};
use domain::{NewUser, MSG_LOGGED_OUT, MSG_RESET_SENT};

use crate::extractors::ValidatedJson;
use crate::state::AppState;

/// User registration request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login identifier (stored as the email)
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "user@example.com")]
    pub id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "TestPassword123!")]
    pub password: String,
    /// Defaults to `password` when omitted
    #[schema(example = "TestPassword123!")]
    pub password_confirm: Option<String>,
}

/// User login request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "user@example.com")]
    pub id: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "TestPassword123!")]
    pub password: String,
}

/// Password reset request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PasswordResetRequest {
    #[validate(length(min = 1, message = "Identifier is required"))]
    #[schema(example = "user@example.com")]
    pub id: String,
}

/// Session token issued by the backend
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Plain confirmation message
#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Token validity report
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifiedResponse {
    pub verified: bool,
}

/// Create routes that need no session
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/verify_user", get(verify_user))
        .route("/password_reset", post(password_reset))
}

/// Register a new user and return a session token
#[utoipa::path(
    post,
    path = "/register",
    tag = "Authentication",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = TokenResponse),
        (status = 400, description = "User already exists or invalid data")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<Json<TokenResponse>> {
    let draft = NewUser::registration(payload.id, payload.password, payload.password_confirm);
    let (identity, password) = (draft.email.clone(), draft.password.clone());

    state.backend.register(draft).await?;
    info!("Registered user {}", identity);

    let session = state
        .backend
        .login(&identity, &password)
        .await
        .map_err(|e| {
            warn!("User {} was created but could not sign in: {}", identity, e);
            match e {
                AppError::InvalidCredentials => {
                    AppError::internal(format!("sign-in after registering {identity} rejected"))
                }
                other => other,
            }
        })?;
    Ok(Json(TokenResponse {
        token: session.token,
    }))
}

/// Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    let session = state.backend.login(&payload.id, &payload.password).await?;
    Ok(Json(TokenResponse {
        token: session.token,
    }))
}

/// End the session on the client side
///
/// Tokens are not tracked by the gateway; the client discards its token.
#[utoipa::path(
    post,
    path = "/logout",
    tag = "Authentication",
    responses(
        (status = 200, description = "Logged out", body = MessageResponse)
    )
)]
pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new(MSG_LOGGED_OUT))
}

/// Report whether the presented token is valid, without failing
///
/// Any failure to confirm the token, including an unreachable backend,
/// reports `verified: false`.
#[utoipa::path(
    get,
    path = "/verify_user",
    tag = "Authentication",
    security((), ("bearer_auth" = [])),
    responses(
        (status = 200, description = "Token validity", body = VerifiedResponse)
    )
)]
pub async fn verify_user(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Json<VerifiedResponse> {
    let Ok(token) = bearer_token(&headers) else {
        return Json(VerifiedResponse { verified: false });
    };

    let verified = match state.backend.refresh(token).await {
        Ok(_) => true,
        Err(AppError::InvalidToken) => false,
        Err(e) => {
            warn!("Token check failed: {}", e);
            false
        }
    };

    Json(VerifiedResponse { verified })
}

/// Request a password reset link
#[utoipa::path(
    post,
    path = "/password_reset",
    tag = "Authentication",
    request_body = PasswordResetRequest,
    responses(
        (status = 200, description = "Reset link sent", body = MessageResponse),
        (status = 400, description = "Backend rejected the request"),
        (status = 404, description = "User not found")
    )
)]
pub async fn password_reset(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<PasswordResetRequest>,
) -> AppResult<Json<MessageResponse>> {
    if state.backend.user_exists(&payload.id).await? == Some(false) {
        return Err(AppError::UserNotFound);
    }

    state.backend.request_password_reset(&payload.id).await?;
    Ok(Json(MessageResponse::new(MSG_RESET_SENT)))
}
