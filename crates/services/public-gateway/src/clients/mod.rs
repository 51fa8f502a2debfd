//! Backend access for the public gateway.

mod pocketbase_backend;

use async_trait::async_trait;
use serde_json::{Map, Value};

use common::AppResult;
use domain::{AuthSession, NewUser, UserRecord};

pub use pocketbase_backend::PocketBaseAuthBackend;

/// Identity operations the public gateway forwards to the backend.
///
/// Every call that acts on behalf of a user takes that user's token; the
/// implementation keeps no session of its own.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthBackend: Send + Sync {
    /// Create a user record. Fails with `UserExists` for a taken identifier.
    async fn register(&self, user: NewUser) -> AppResult<UserRecord>;

    /// Exchange credentials for a session. Fails with `InvalidCredentials`.
    async fn login(&self, identity: &str, password: &str) -> AppResult<AuthSession>;

    /// Validate a token and obtain a reissued session. Fails with `InvalidToken`.
    async fn refresh(&self, token: &str) -> AppResult<AuthSession>;

    async fn get_user(&self, token: &str, id: &str) -> AppResult<UserRecord>;

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord>;

    async fn delete_user(&self, token: &str, id: &str) -> AppResult<()>;

    /// Whether a user with this email exists, or `None` when the backend
    /// cannot be asked.
    async fn user_exists(&self, email: &str) -> AppResult<Option<bool>>;

    async fn request_password_reset(&self, email: &str) -> AppResult<()>;

    /// Backend health message.
    async fn health(&self) -> AppResult<String>;
}
