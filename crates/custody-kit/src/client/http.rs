//! `reqwest`-backed HTTP transport.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::error::{Error, HttpError};

use super::transport::{ApiRequest, HttpMethod, Transport, TransportFuture};

/// HTTP transport for the custody REST API.
///
/// Resolves request paths and server-supplied links against a base URL,
/// attaches the bearer token when one is configured, and decodes JSON bodies.
/// Non-2xx answers are returned as [`HttpError::Status`]; mapping them onto
/// typed errors is left to the [`CallWrapper`](super::CallWrapper).
pub struct HttpTransport {
    base_url: Url,
    client: reqwest::Client,
    api_key: Option<String>,
}

impl HttpTransport {
    /// Create a transport for the given base URL.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport whose requests time out after `timeout`.
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(HttpError::Request)?;
        Self::with_client(base_url, client)
    }

    /// Create a transport around a preconfigured `reqwest` client.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, Error> {
        Ok(Self {
            base_url: normalize_base(base_url)?,
            client,
            api_key: None,
        })
    }

    /// Send `Authorization: Bearer <key>` with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Get the base URL (always ends with `/`).
    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// Resolve a relative path or absolute link against the base URL.
    pub fn resolve(&self, path: &str) -> Result<Url, HttpError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            return Url::parse(path).map_err(|e| HttpError::InvalidUrl(format!("{}: {}", path, e)));
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", path, e)))
    }

    async fn send(&self, request: ApiRequest) -> Result<serde_json::Value, Error> {
        let mut url = self.resolve(&request.path)?;
        if let Some(params) = &request.params {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in params.pairs() {
                pairs.append_pair(key, value);
            }
        }

        debug!(
            method = %request.method,
            url = %url,
            with_params = request.params.is_some(),
            "sending request"
        );

        let mut builder = self.client.request(to_reqwest(request.method), url.clone());
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(HttpError::Request)?;
        let status = response.status();
        let body = response.text().await.map_err(HttpError::Request)?;

        debug!(url = %url, status = status.as_u16(), "received response");

        if !status.is_success() {
            return Err(HttpError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        Ok(serde_json::from_str(&body).map_err(HttpError::Json)?)
    }
}

impl Transport for HttpTransport {
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_> {
        Box::pin(self.send(request))
    }
}

impl std::fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport")
            .field("base_url", &self.base_url.as_str())
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

// ============================================================================
// Helper functions
// ============================================================================

fn normalize_base(base_url: &str) -> Result<Url, HttpError> {
    let mut normalized = base_url.to_string();
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    let url = Url::parse(&normalized)
        .map_err(|e| HttpError::InvalidUrl(format!("{}: {}", base_url, e)))?;
    if url.cannot_be_a_base() {
        return Err(HttpError::InvalidUrl(base_url.to_string()));
    }
    Ok(url)
}

fn to_reqwest(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
        HttpMethod::Patch => reqwest::Method::PATCH,
        HttpMethod::Put => reqwest::Method::PUT,
        HttpMethod::Delete => reqwest::Method::DELETE,
    }
}
