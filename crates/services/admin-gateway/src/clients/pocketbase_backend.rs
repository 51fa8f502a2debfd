//! PocketBase-backed user management.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tracing::debug;

use common::{AppError, AppResult};
use domain::{AuthSession, RecordFilter, UserRecord};
use pocketbase::{ClientError, ListOptions, PocketBase, RecordService};

use super::UserBackend;

/// [`UserBackend`] over the PocketBase users and superusers collections.
pub struct PocketBaseUserBackend {
    client: PocketBase,
    users_collection: String,
    admin_collection: String,
}

impl PocketBaseUserBackend {
    pub fn new(
        client: PocketBase,
        users_collection: impl Into<String>,
        admin_collection: impl Into<String>,
    ) -> Self {
        Self {
            client,
            users_collection: users_collection.into(),
            admin_collection: admin_collection.into(),
        }
    }

    fn users(&self, token: &str) -> RecordService {
        self.client
            .collection(self.users_collection.as_str())
            .with_token(token)
    }
}

#[async_trait]
impl UserBackend for PocketBaseUserBackend {
    async fn verify_admin(&self, token: &str) -> AppResult<AuthSession> {
        self.client
            .collection(self.admin_collection.as_str())
            .with_token(token)
            .auth_refresh()
            .await
            .map_err(|e| match e {
                ClientError::Api { .. } => AppError::InvalidToken,
                other => AppError::from(other),
            })
    }

    async fn create_user(
        &self,
        token: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord> {
        self.users(token)
            .create(&fields)
            .await
            .map_err(AppError::rejected_write)
    }

    async fn list_users(&self, token: &str, filter: RecordFilter) -> AppResult<Vec<UserRecord>> {
        let options = ListOptions {
            filter: filter.expression(),
            sort: filter.sort().map(str::to_string),
        };

        Ok(self.users(token).get_full_list(&options).await?)
    }

    async fn get_user(&self, token: &str, id: &str) -> AppResult<UserRecord> {
        self.users(token).get_one(id).await.map_err(|e| {
            debug!("Lookup of user {} failed: {}", id, e);
            AppError::UserNotFound
        })
    }

    async fn update_user(
        &self,
        token: &str,
        id: &str,
        fields: Map<String, Value>,
    ) -> AppResult<UserRecord> {
        self.users(token)
            .update(id, &fields)
            .await
            .map_err(AppError::rejected_write)
    }

    async fn delete_user(&self, token: &str, id: &str) -> AppResult<()> {
        self.users(token)
            .delete(id)
            .await
            .map_err(AppError::rejected_write)
    }

    async fn health(&self) -> AppResult<String> {
        Ok(self.client.health().await?.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, PocketBaseUserBackend) {
        let server = MockServer::start().await;
        let client = PocketBase::new(&server.uri()).unwrap();
        (server, PocketBaseUserBackend::new(client, "users", "_superusers"))
    }

    #[tokio::test]
    async fn admin_token_is_checked_against_superusers() {
        let (server, backend) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/collections/_superusers/auth-refresh"))
            .and(header("Authorization", "admin-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "token": "admin-token-2",
                "record": { "id": "su1", "email": "root@example.com" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let session = backend.verify_admin("admin-token").await.unwrap();
        assert_eq!(session.record_id(), Some("su1"));
    }

    #[tokio::test]
    async fn regular_user_token_is_not_an_admin() {
        let (server, backend) = setup().await;
        Mock::given(method("POST"))
            .and(path("/api/collections/_superusers/auth-refresh"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "status": 401, "message": "The request requires valid record authorization token.", "data": {}
            })))
            .mount(&server)
            .await;

        let err = backend.verify_admin("user-token").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidToken));
    }

    #[tokio::test]
    async fn list_forwards_filter_and_sort() {
        let (server, backend) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/collections/users/records"))
            .and(header("Authorization", "admin-token"))
            .and(query_param("filter", "role=\"read-write\""))
            .and(query_param("sort", "-created"))
            .and(query_param("perPage", "500"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1, "perPage": 500, "totalItems": -1, "totalPages": -1,
                "items": [ { "id": "a" }, { "id": "b" } ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filter =
            RecordFilter::from_params([("role", "read-write"), ("sort", "-created")]).unwrap();
        let users = backend.list_users("admin-token", filter).await.unwrap();

        let ids: Vec<_> = users.iter().filter_map(|u| u.id()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn any_lookup_failure_is_not_found() {
        let (server, backend) = setup().await;
        Mock::given(method("GET"))
            .and(path("/api/collections/users/records/missing"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "status": 400, "message": "Something went wrong.", "data": {}
            })))
            .mount(&server)
            .await;

        let err = backend.get_user("admin-token", "missing").await.unwrap_err();
        assert!(matches!(err, AppError::UserNotFound));
    }

    #[tokio::test]
    async fn rejected_update_relays_backend_message() {
        let (server, backend) = setup().await;
        Mock::given(method("PATCH"))
            .and(path("/api/collections/users/records/u1"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": 404, "message": "The requested resource wasn't found.", "data": {}
            })))
            .mount(&server)
            .await;

        let mut fields = Map::new();
        fields.insert("name".into(), json!("Jane"));
        match backend.update_user("admin-token", "u1", fields).await.unwrap_err() {
            AppError::BadRequest(msg) => assert_eq!(msg, "The requested resource wasn't found."),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn delete_succeeds_on_no_content() {
        let (server, backend) = setup().await;
        Mock::given(method("DELETE"))
            .and(path("/api/collections/users/records/u1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        backend.delete_user("admin-token", "u1").await.unwrap();
    }
}
