// ABOUTME: Remote query endpoint client — POST /query, GET /health, POST /test over reqwest.
// ABOUTME: Any transport, status, or decoding failure becomes a ClientError for the caller to absorb.

use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("endpoint returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Body of a chat query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryRequest {
    pub mobile_number: String,
    pub query: String,
}

/// Reply from the query or test endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub openai_status: Option<bool>,
}

impl HealthStatus {
    pub fn is_up(&self) -> bool {
        self.status.eq_ignore_ascii_case("up")
    }
}

/// The remote side of the responder. Implementations must not panic on bad input.
#[async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(&self, request: &QueryRequest, token: &str) -> Result<QueryResponse, ClientError>;

    async fn health(&self) -> Result<HealthStatus, ClientError>;

    /// Unauthenticated query used for smoke-testing the service.
    async fn test_query(&self, query: &str) -> Result<QueryResponse, ClientError>;
}

/// [`QueryClient`] over HTTP/JSON.
pub struct HttpQueryClient {
    base_url: String,
    http: reqwest::Client,
}

impl HttpQueryClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

/// Reject non-2xx, then decode the body as `T`.
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(ClientError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl QueryClient for HttpQueryClient {
    async fn query(&self, request: &QueryRequest, token: &str) -> Result<QueryResponse, ClientError> {
        let response = self
            .http
            .post(self.url("query"))
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    async fn health(&self) -> Result<HealthStatus, ClientError> {
        let response = self.http.get(self.url("health")).send().await?;
        decode(response).await
    }

    async fn test_query(&self, query: &str) -> Result<QueryResponse, ClientError> {
        let response = self
            .http
            .post(self.url("test"))
            .json(&serde_json::json!({ "query": query }))
            .send()
            .await?;
        decode(response).await
    }
}
