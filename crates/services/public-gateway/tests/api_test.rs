//! Integration tests for the public gateway endpoints.
//!
//! These tests drive the full router against an in-memory backend, so no
//! PocketBase instance is required.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Map, Value};
use tower::ServiceExt;

use common::{AppError, AppResult};
use domain::{AuthSession, NewUser, UserRecord};
use public_gateway_lib::clients::AuthBackend;
use public_gateway_lib::routes::create_router;
use public_gateway_lib::state::AppState;

// =============================================================================
// In-memory Backend
// =============================================================================

struct StoredUser {
    password: String,
    record: UserRecord,
}

#[derive(Default)]
struct Store {
    users: HashMap<String, StoredUser>,
    /// token -> user id
    tokens: HashMap<String, String>,
    reset_requests: Vec<String>,
    counter: u32,
}

impl Store {
    fn issue_token(&mut self, user_id: &str) -> String {
        self.counter += 1;
        let token = format!("token-{}-{}", user_id, self.counter);
        self.tokens.insert(token.clone(), user_id.to_string());
        token
    }

    fn session_user(&self, token: &str) -> AppResult<&str> {
        self.tokens
            .get(token)
            .map(String::as_str)
            .ok_or(AppError::InvalidToken)
    }
}

/// Backend double that behaves like a single-collection auth store.
#[derive(Default)]
struct InMemoryBackend {
    store: Mutex<Store>,
}

#[async_trait]
impl AuthBackend for InMemoryBackend {
    async fn register(&self, user: NewUser) -> AppResult<UserRecord> {
        let mut store = self.store.lock().unwrap();
        if store
            .users
            .values()
            .any(|u| u.record.email() == Some(user.email.as_str()))
        {
            return Err(AppError::UserExists);
        }
        if user.password != user.password_confirm {
            return Err(AppError::bad_request("Failed to create record."));
        }

        store.counter += 1;
        let id = format!("user{}", store.counter);
        let record: UserRecord = serde_json::from_value(json!({
            "id": id,
            "email": user.email,
            "username": user.email,
            "emailVisibility": user.email_visibility,
            "verified": user.verified,
            "role": user.role,
        }))
        .unwrap();

        store.users.insert(
            id,
            StoredUser {
                password: user.password,
                record: record.clone(),
            },
        );
        Ok(record)
    }

    async fn login(&self, identity: &str, password: &str) -> AppResult<AuthSession> {
        let mut store = self.store.lock().unwrap();
        let found = store
            .users
            .values()
            .find(|u| u.record.email() == Some(identity) && u.password == password)
            .map(|u| u.record.clone())
            .ok_or(AppError::InvalidCredentials)?;

        let token = store.issue_token(found.id().unwrap());
        Ok(AuthSession {
            token,
            record: found,
        })
    }

    async fn refresh(&self, token: &str) -> AppResult<AuthSession> {
        let mut store = self.store.lock().unwrap();
        let user_id = store.session_user(token)?.to_string();
        let record = store
            .users
            .get(&user_id)
            .map(|u| u.record.clone())
            .ok_or(AppError::InvalidToken)?;

        let token = store.issue_token(&user_id);
        Ok(AuthSession { token, record })
    }

    async fn get_user(&self, token: &str, id: &str) -> AppResult<UserRecord> {
        let store = self.store.lock().unwrap();
        store.session_user(token)?;
        store
            .users
            .get(id)
            .map(|u| u.record.clone())
            .ok_or(AppError::UserNotFound)
    }

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord> {
        let mut store = self.store.lock().unwrap();
        store.session_user(token)?;
        let user = store.users.get_mut(id).ok_or(AppError::UserNotFound)?;
        user.record.merge(fields);
        Ok(user.record.clone())
    }

    async fn delete_user(&self, token: &str, id: &str) -> AppResult<()> {
        let mut store = self.store.lock().unwrap();
        store.session_user(token)?;
        store.users.remove(id).ok_or(AppError::UserNotFound)?;
        store.tokens.retain(|_, user_id| user_id != id);
        Ok(())
    }

    async fn user_exists(&self, email: &str) -> AppResult<Option<bool>> {
        let store = self.store.lock().unwrap();
        Ok(Some(
            store.users.values().any(|u| u.record.email() == Some(email)),
        ))
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        self.store
            .lock()
            .unwrap()
            .reset_requests
            .push(email.to_string());
        Ok(())
    }

    async fn health(&self) -> AppResult<String> {
        Ok("API is healthy.".to_string())
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

const USER_ID: &str = "testuser@example.com";
const PASSWORD: &str = "TestPassword123!";

fn test_app() -> (Router, Arc<InMemoryBackend>) {
    let backend = Arc::new(InMemoryBackend::default());
    let app = create_router(AppState::new(backend.clone()));
    (app, backend)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

async fn register(app: &Router) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "id": USER_ID, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

// =============================================================================
// Registration & Login
// =============================================================================

#[tokio::test]
async fn register_returns_token() {
    let (app, _) = test_app();
    let token = register(&app).await;
    assert!(!token.is_empty());
}

#[tokio::test]
async fn register_sets_defaults_on_new_user() {
    let (app, backend) = test_app();
    register(&app).await;

    let store = backend.store.lock().unwrap();
    let user = store.users.values().next().unwrap();
    assert_eq!(user.record.role(), Some("read-write"));
    assert!(!user.record.is_verified());
}

#[tokio::test]
async fn register_existing_user_fails() {
    let (app, _) = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "id": USER_ID, "password": PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn register_without_identifier_is_rejected() {
    let (app, _) = test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/register",
        None,
        Some(json!({ "id": "", "password": PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Identifier is required");
}

#[tokio::test]
async fn login_with_valid_credentials() {
    let (app, _) = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "id": USER_ID, "password": PASSWORD })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].is_string());
}

#[tokio::test]
async fn login_with_wrong_password() {
    let (app, _) = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "id": USER_ID, "password": "WrongPass123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

// =============================================================================
// Session Checks
// =============================================================================

#[tokio::test]
async fn verify_access_with_valid_token() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::GET, "/verify_access", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["hasAccess"], true);
}

#[tokio::test]
async fn verify_access_without_token() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/verify_access", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");
}

#[tokio::test]
async fn invalid_token_is_forbidden_on_every_session_route() {
    let (app, _) = test_app();

    for (method, uri) in [
        (Method::GET, "/verify_access"),
        (Method::GET, "/user_data"),
        (Method::PUT, "/update_user_data"),
        (Method::POST, "/refresh"),
        (Method::DELETE, "/unregister"),
    ] {
        let body = (method == Method::PUT).then(|| json!({ "email": "x@example.com" }));
        let (status, body) = send(&app, method, uri, Some("fake_token"), body).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{uri}");
        assert_eq!(body["error"], "Invalid token", "{uri}");
    }
}

#[tokio::test]
async fn verify_user_reports_validity_without_failing() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::GET, "/verify_user", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], true);

    let (status, body) = send(&app, Method::GET, "/verify_user", Some("fake_token"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], false);

    let (status, body) = send(&app, Method::GET, "/verify_user", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["verified"], false);
}

#[tokio::test]
async fn refresh_issues_a_working_token() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::POST, "/refresh", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    let refreshed = body["token"].as_str().unwrap().to_string();
    assert_ne!(refreshed, token);

    let (status, _) = send(&app, Method::GET, "/verify_access", Some(&refreshed), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_confirms() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::POST, "/logout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out");
}

// =============================================================================
// Profile
// =============================================================================

#[tokio::test]
async fn get_user_data_returns_own_record() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::GET, "/user_data", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], USER_ID);
    assert_eq!(body["data"]["email"], USER_ID);
}

#[tokio::test]
async fn update_user_data_is_visible_on_next_read() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/update_user_data",
        Some(&token),
        Some(json!({ "name": "New Name" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Updated successfully");
    assert_eq!(body["data"]["name"], "New Name");

    let (status, body) = send(&app, Method::GET, "/user_data", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "New Name");
}

#[tokio::test]
async fn update_user_data_requires_json_object() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(
        &app,
        Method::PUT,
        "/update_user_data",
        Some(&token),
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

// =============================================================================
// Password Reset & Unregister
// =============================================================================

#[tokio::test]
async fn password_reset_for_known_user() {
    let (app, backend) = test_app();
    register(&app).await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/password_reset",
        None,
        Some(json!({ "id": USER_ID })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Reset link sent");
    assert_eq!(
        backend.store.lock().unwrap().reset_requests,
        vec![USER_ID.to_string()]
    );
}

#[tokio::test]
async fn password_reset_for_unknown_user() {
    let (app, backend) = test_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/password_reset",
        None,
        Some(json!({ "id": "unknown_user" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
    assert!(backend.store.lock().unwrap().reset_requests.is_empty());
}

#[tokio::test]
async fn unregister_then_login_fails() {
    let (app, _) = test_app();
    let token = register(&app).await;

    let (status, body) = send(&app, Method::DELETE, "/unregister", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted");

    let (status, body) = send(
        &app,
        Method::POST,
        "/login",
        None,
        Some(json!({ "id": USER_ID, "password": PASSWORD })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_backend() {
    let (app, _) = test_app();
    let (status, body) = send(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"]["message"], "API is healthy.");
}
