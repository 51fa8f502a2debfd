//! Record and auth operations on a single collection.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use url::Url;

use crate::client::PocketBase;
use crate::error::ClientResult;

/// Default page size for [`RecordService::get_full_list`]
const DEFAULT_BATCH_SIZE: u32 = 500;

/// Filter and sort applied to list requests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOptions {
    pub filter: Option<String>,
    pub sort: Option<String>,
}

/// One page of records.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult<R> {
    pub page: u32,
    pub per_page: u32,
    /// `-1` when the backend skipped counting
    #[serde(default)]
    pub total_items: i64,
    #[serde(default)]
    pub total_pages: i64,
    pub items: Vec<R>,
}

/// Operations scoped to one collection, optionally on behalf of a token.
#[derive(Debug, Clone)]
pub struct RecordService {
    client: PocketBase,
    collection: String,
    token: Option<String>,
}

impl RecordService {
    pub(crate) fn new(client: PocketBase, collection: String) -> Self {
        Self {
            client,
            collection,
            token: None,
        }
    }

    /// Issue subsequent calls with the given auth token.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    // =========================================================================
    // Records
    // =========================================================================

    /// Create a record.
    pub async fn create<B, R>(&self, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.records_url(None)?;
        debug!("POST {}", url);
        let request = self.client.http().post(url).json(body);
        self.client.send_json(request, self.token()).await
    }

    /// Fetch a single record by id.
    pub async fn get_one<R: DeserializeOwned>(&self, id: &str) -> ClientResult<R> {
        let url = self.records_url(Some(id))?;
        debug!("GET {}", url);
        let request = self.client.http().get(url);
        self.client.send_json(request, self.token()).await
    }

    /// Fetch one page of records.
    pub async fn get_list<R: DeserializeOwned>(
        &self,
        page: u32,
        per_page: u32,
        options: &ListOptions,
    ) -> ClientResult<ListResult<R>> {
        let url = self.records_url(None)?;
        debug!(
            "GET {} page={} perPage={} filter={:?}",
            url, page, per_page, options.filter
        );

        let mut query = vec![
            ("page", page.to_string()),
            ("perPage", per_page.to_string()),
            ("skipTotal", "1".to_string()),
        ];
        if let Some(filter) = &options.filter {
            query.push(("filter", filter.clone()));
        }
        if let Some(sort) = &options.sort {
            query.push(("sort", sort.clone()));
        }

        let request = self.client.http().get(url).query(&query);
        self.client.send_json(request, self.token()).await
    }

    /// Fetch every matching record, one batch at a time.
    pub async fn get_full_list<R: DeserializeOwned>(
        &self,
        options: &ListOptions,
    ) -> ClientResult<Vec<R>> {
        self.get_full_list_batched(DEFAULT_BATCH_SIZE, options).await
    }

    /// Same as [`get_full_list`](Self::get_full_list) with an explicit batch size.
    pub async fn get_full_list_batched<R: DeserializeOwned>(
        &self,
        batch_size: u32,
        options: &ListOptions,
    ) -> ClientResult<Vec<R>> {
        let batch_size = batch_size.max(1);
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let result: ListResult<R> = self.get_list(page, batch_size, options).await?;
            let fetched = result.items.len();
            records.extend(result.items);

            if fetched < batch_size as usize {
                break;
            }
            page += 1;
        }

        Ok(records)
    }

    /// Patch a record.
    pub async fn update<B, R>(&self, id: &str, body: &B) -> ClientResult<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.records_url(Some(id))?;
        debug!("PATCH {}", url);
        let request = self.client.http().patch(url).json(body);
        self.client.send_json(request, self.token()).await
    }

    /// Delete a record.
    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        let url = self.records_url(Some(id))?;
        debug!("DELETE {}", url);
        let request = self.client.http().delete(url);
        self.client.send(request, self.token()).await?;
        Ok(())
    }

    // =========================================================================
    // Auth
    // =========================================================================

    /// Exchange an identity and password for an auth response (`{token, record}`).
    pub async fn auth_with_password<A: DeserializeOwned>(
        &self,
        identity: &str,
        password: &str,
    ) -> ClientResult<A> {
        let url = self.action_url("auth-with-password")?;
        debug!("POST {} identity={}", url, identity);
        let request = self
            .client
            .http()
            .post(url)
            .json(&json!({ "identity": identity, "password": password }));
        self.client.send_json(request, None).await
    }

    /// Validate the current token and obtain a reissued one.
    pub async fn auth_refresh<A: DeserializeOwned>(&self) -> ClientResult<A> {
        let url = self.action_url("auth-refresh")?;
        debug!("POST {}", url);
        let request = self.client.http().post(url);
        self.client.send_json(request, self.token()).await
    }

    /// Ask the backend to email a password reset link.
    pub async fn request_password_reset(&self, email: &str) -> ClientResult<()> {
        let url = self.action_url("request-password-reset")?;
        debug!("POST {}", url);
        let request = self.client.http().post(url).json(&json!({ "email": email }));
        self.client.send(request, None).await?;
        Ok(())
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn records_url(&self, id: Option<&str>) -> ClientResult<Url> {
        match id {
            Some(id) => self
                .client
                .endpoint(&["api", "collections", &self.collection, "records", id]),
            None => self
                .client
                .endpoint(&["api", "collections", &self.collection, "records"]),
        }
    }

    fn action_url(&self, action: &str) -> ClientResult<Url> {
        self.client
            .endpoint(&["api", "collections", &self.collection, action])
    }
}
