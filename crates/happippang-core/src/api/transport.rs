//! Wire transport seam.
//!
//! `ApiClient` builds `ApiRequest`s and hands them to a `Transport`; the
//! interceptor logic never touches reqwest directly.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base URL, starting with `/`
    pub path: String,
    pub body: Option<serde_json::Value>,
    /// Bearer credential for the `Authorization` header
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn get(path: &str) -> Self {
        Self {
            method: Method::GET,
            path: path.to_string(),
            body: None,
            bearer: None,
        }
    }

    pub fn post(path: &str, body: serde_json::Value) -> Self {
        Self {
            method: Method::POST,
            path: path.to_string(),
            body: Some(body),
            bearer: None,
        }
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

impl fmt::Debug for ApiRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiRequest")
            .field("method", &self.method)
            .field("path", &self.path)
            .field("authorized", &self.bearer.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    /// Build a response from a raw status code; unknown codes read as 500
    pub fn with_status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status: StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body: body.into(),
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_str(&self.body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse JSON response: {}", e)))
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and return whatever status came back.
    /// Only failures to get a response at all are errors here.
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// Transport over reqwest.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = self.url(&request.path);

        let mut builder = self
            .client
            .request(request.method.clone(), &url)
            .header(header::ACCEPT, "application/json");
        if let Some(ref token) = request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(method = %request.method, url = %url, status = status.as_u16(), "API response");

        Ok(ApiResponse { status, body })
    }
}
