//! Transport abstraction and request primitives.
//!
//! The [`Transport`] trait is the seam between the client and the network.
//! [`HttpTransport`](super::HttpTransport) implements it over `reqwest`; tests and
//! embedders can supply their own.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Boxed future returned by a transport call.
pub type TransportFuture<'a> =
    Pin<Box<dyn Future<Output = Result<serde_json::Value, Error>> + Send + 'a>>;

// ============================================================================
// HttpMethod
// ============================================================================

/// HTTP verb of a request or of a hyperlink embedded in a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Put,
    Delete,
}

impl HttpMethod {
    /// Returns the verb as an upper-case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// QueryParams
// ============================================================================

/// Ordered query parameters.
///
/// Scalars are stored as strings; lists are flattened into repeated keys
/// (`?status=a&status=b`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    /// Create an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a scalar parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Append one entry per value under the same key.
    pub fn insert_all<I, V>(&mut self, key: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: ToString,
    {
        let key = key.into();
        for value in values {
            self.0.push((key.clone(), value.to_string()));
        }
    }

    /// First value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Key/value pairs in insertion order.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.0
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

// ============================================================================
// ApiRequest
// ============================================================================

/// A single call to the API, before it reaches the wire.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    /// Relative path or absolute URL (server-supplied links are passed through).
    pub path: String,
    pub params: Option<QueryParams>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    /// Create a request without parameters or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            params: None,
            body: None,
        }
    }

    /// Attach query parameters.
    pub fn with_params(mut self, params: QueryParams) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

// ============================================================================
// Transport Trait
// ============================================================================

/// Something that can execute an [`ApiRequest`] and return the decoded JSON body.
///
/// Implementations must not retry; failures are reported as-is and any
/// cross-cutting policy is applied by a [`CallWrapper`](super::CallWrapper).
///
/// # Example Implementation
///
/// ```rust,ignore
/// use custody_kit::{ApiRequest, Transport, TransportFuture};
///
/// struct Fixed(serde_json::Value);
///
/// impl Transport for Fixed {
///     fn execute(&self, _request: ApiRequest) -> TransportFuture<'_> {
///         let body = self.0.clone();
///         Box::pin(async move { Ok(body) })
///     }
/// }
/// ```
pub trait Transport: Send + Sync {
    /// Execute a request.
    fn execute(&self, request: ApiRequest) -> TransportFuture<'_>;
}
