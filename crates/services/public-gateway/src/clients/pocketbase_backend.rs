//! PocketBase-backed identity operations.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use common::{AppError, AppResult};
use domain::{filter, AuthSession, NewUser, UserRecord};
use pocketbase::{ClientError, ListResult, PocketBase, RecordService};

use super::AuthBackend;

/// Validation code the backend reports for a duplicate unique field
const CODE_NOT_UNIQUE: &str = "validation_not_unique";

/// [`AuthBackend`] over one PocketBase auth collection.
pub struct PocketBaseAuthBackend {
    client: PocketBase,
    collection: String,
    /// Privileged token used only for user lookups
    service_token: Option<String>,
}

impl PocketBaseAuthBackend {
    pub fn new(
        client: PocketBase,
        collection: impl Into<String>,
        service_token: Option<String>,
    ) -> Self {
        Self {
            client,
            collection: collection.into(),
            service_token,
        }
    }

    fn records(&self) -> RecordService {
        self.client.collection(self.collection.as_str())
    }

    fn records_as(&self, token: &str) -> RecordService {
        self.records().with_token(token)
    }
}

#[async_trait]
impl AuthBackend for PocketBaseAuthBackend {
    async fn register(&self, user: NewUser) -> AppResult<UserRecord> {
        self.records().create(&user).await.map_err(|e| {
            if e.field_code("email") == Some(CODE_NOT_UNIQUE) {
                AppError::UserExists
            } else {
                AppError::from(e)
            }
        })
    }

    async fn login(&self, identity: &str, password: &str) -> AppResult<AuthSession> {
        self.records()
            .auth_with_password(identity, password)
            .await
            .map_err(|e| {
                if matches!(e, ClientError::Api { .. }) {
                    debug!("Login rejected for {}: {}", identity, e);
                    AppError::InvalidCredentials
                } else {
                    AppError::from(e)
                }
            })
    }

    async fn refresh(&self, token: &str) -> AppResult<AuthSession> {
        self.records_as(token)
            .auth_refresh()
            .await
            .map_err(|e| match e {
                ClientError::Api { .. } => AppError::InvalidToken,
                other => AppError::from(other),
            })
    }

    async fn get_user(&self, token: &str, id: &str) -> AppResult<UserRecord> {
        Ok(self.records_as(token).get_one(id).await?)
    }

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord> {
        self.records_as(token)
            .update(id, &fields)
            .await
            .map_err(AppError::rejected_write)
    }

    async fn delete_user(&self, token: &str, id: &str) -> AppResult<()> {
        self.records_as(token)
            .delete(id)
            .await
            .map_err(AppError::rejected_write)
    }

    async fn user_exists(&self, email: &str) -> AppResult<Option<bool>> {
        let Some(service_token) = &self.service_token else {
            return Ok(None);
        };

        let options = pocketbase::ListOptions {
            filter: Some(format!("email=\"{}\"", filter::escape(email))),
            sort: None,
        };
        let page: ListResult<UserRecord> = self
            .records_as(service_token)
            .get_list(1, 1, &options)
            .await
            .map_err(|e| {
                warn!("User lookup with service token failed: {}", e);
                AppError::from(e)
            })?;

        Ok(Some(!page.items.is_empty()))
    }

    async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        Ok(self.records().request_password_reset(email).await?)
    }

    async fn health(&self) -> AppResult<String> {
        let status = self.client.health().await?;
        Ok(status.message)
    }
}
