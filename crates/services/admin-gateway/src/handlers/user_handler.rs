//! User management handlers.

use axum::{
    extract::{Extension, Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;
use utoipa::ToSchema;

use common::{AppResult, JsonBody};
use domain::{RecordFilter, UserRecord, MSG_ADMIN_USER_DELETED};

use crate::middleware::CurrentAdmin;
use crate::state::AppState;

/// Record fields to write
#[derive(Debug, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct UserFieldsRequest(pub Map<String, Value>);

/// Deletion confirmation
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedResponse {
    pub message: String,
}

/// Create user management routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route(
            "/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
}

/// Create a user
#[utoipa::path(
    post,
    path = "/admin/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body = UserFieldsRequest,
    responses(
        (status = 201, description = "User created", body = UserRecord),
        (status = 400, description = "Backend rejected the record"),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn create_user(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    JsonBody(UserFieldsRequest(fields)): JsonBody<UserFieldsRequest>,
) -> AppResult<(StatusCode, Json<UserRecord>)> {
    let user = state.backend.create_user(&admin.token, fields).await?;
    info!("Created user {:?}", user.id());
    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
///
/// `filter` is a raw filter expression, `sort` a sort expression; any
/// other parameter matches that field exactly.
#[utoipa::path(
    get,
    path = "/admin/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(
        ("filter" = Option<String>, Query, description = "Raw filter expression"),
        ("sort" = Option<String>, Query, description = "Sort expression, e.g. -created")
    ),
    responses(
        (status = 200, description = "Matching users", body = [UserRecord]),
        (status = 400, description = "Invalid filter"),
        (status = 401, description = "No token provided"),
        (status = 403, description = "Invalid token")
    )
)]
pub async fn list_users(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> AppResult<Json<Vec<UserRecord>>> {
    let filter = RecordFilter::from_params(params)?;
    let users = state.backend.list_users(&admin.token, filter).await?;
    Ok(Json(users))
}

/// Get a user by id
#[utoipa::path(
    get,
    path = "/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "User found", body = UserRecord),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<UserRecord>> {
    let user = state.backend.get_user(&admin.token, &id).await?;
    Ok(Json(user))
}

/// Update a user
#[utoipa::path(
    put,
    path = "/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Record id")),
    request_body = UserFieldsRequest,
    responses(
        (status = 200, description = "User updated", body = UserRecord),
        (status = 400, description = "Backend rejected the update")
    )
)]
pub async fn update_user(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(UserFieldsRequest(fields)): JsonBody<UserFieldsRequest>,
) -> AppResult<Json<UserRecord>> {
    let user = state.backend.update_user(&admin.token, &id, fields).await?;
    Ok(Json(user))
}

/// Delete a user
#[utoipa::path(
    delete,
    path = "/admin/users/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Record id")),
    responses(
        (status = 200, description = "User deleted", body = DeletedResponse),
        (status = 400, description = "Backend rejected the deletion")
    )
)]
pub async fn delete_user(
    Extension(admin): Extension<CurrentAdmin>,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeletedResponse>> {
    state.backend.delete_user(&admin.token, &id).await?;
    info!("Deleted user {}", id);

    Ok(Json(DeletedResponse {
        message: MSG_ADMIN_USER_DELETED.to_string(),
    }))
}
