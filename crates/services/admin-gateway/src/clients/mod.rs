//! Backend access for the admin gateway.

mod pocketbase_backend;

use async_trait::async_trait;
use serde_json::{Map, Value};

use common::AppResult;
use domain::{AuthSession, RecordFilter, UserRecord};

pub use pocketbase_backend::PocketBaseUserBackend;

/// User management operations, each issued with the admin's own token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserBackend: Send + Sync {
    /// Validate an admin token. Fails with `InvalidToken`.
    async fn verify_admin(&self, token: &str) -> AppResult<AuthSession>;

    async fn create_user(&self, token: &str, fields: Map<String, Value>)
        -> AppResult<UserRecord>;

    /// Every user matching the filter, across all pages.
    async fn list_users(&self, token: &str, filter: RecordFilter) -> AppResult<Vec<UserRecord>>;

    /// Fails with `UserNotFound` whatever the backend reports.
    async fn get_user(&self, token: &str, id: &str) -> AppResult<UserRecord>;

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord>;

    async fn delete_user(&self, token: &str, id: &str) -> AppResult<()>;

    /// Backend health message.
    async fn health(&self) -> AppResult<String>;
}
