//! Backend client handle.

use reqwest::{header::AUTHORIZATION, Client, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize};
use tracing::debug;
use url::Url;

use crate::error::{ClientError, ClientResult};
use crate::records::RecordService;

/// Health report from the backend.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    pub code: u16,
    pub message: String,
}

/// Cloneable handle to one backend instance.
///
/// Holds no session: every call that needs credentials is given a token
/// explicitly through [`RecordService::with_token`].
#[derive(Debug, Clone)]
pub struct PocketBase {
    http: Client,
    base_url: Url,
}

impl PocketBase {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: &str) -> ClientResult<Self> {
        Self::with_client(Client::new(), base_url)
    }

    /// Create a client reusing an existing HTTP client.
    pub fn with_client(http: Client, base_url: &str) -> ClientResult<Self> {
        let base_url =
            Url::parse(base_url).map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }

        debug!("Backend client targeting {}", base_url);
        Ok(Self { http, base_url })
    }

    /// Record operations on one collection.
    pub fn collection(&self, name: impl Into<String>) -> RecordService {
        RecordService::new(self.clone(), name.into())
    }

    /// Check backend liveness.
    pub async fn health(&self) -> ClientResult<HealthStatus> {
        let url = self.endpoint(&["api", "health"])?;
        debug!("GET {}", url);
        self.send_json(self.http.get(url), None).await
    }

    /// Build an API URL from path segments, percent-encoding each one.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Send a request and fail on any non-success status.
    pub(crate) async fn send(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> ClientResult<Response> {
        let request = match token {
            Some(token) => request.header(AUTHORIZATION, token),
            None => request,
        };

        let response = request.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            let err = ClientError::from_response(response).await;
            debug!("Backend rejected request: {}", err);
            Err(err)
        }
    }

    /// Send a request and decode the JSON body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        token: Option<&str>,
    ) -> ClientResult<T> {
        let response = self.send(request, token).await?;
        Ok(response.json().await?)
    }
}
