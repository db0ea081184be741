//! Error types for custody-kit.
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error): Main error type, returned by every async operation
//!   - [`HttpError`]: Transport failures (connection, unmapped status, bad JSON)
//!   - [`ApiError`]: HTTP statuses mapped onto the API's error taxonomy
//!   - [`ConvertError`]: A list entry could not be turned into a domain handle
//!
//! # Error Handling Examples
//!
//! ## Pattern Matching on API Errors
//!
//! ```rust,no_run
//! use custody_kit::*;
//!
//! # async fn example(custody: Custody) -> Result<(), Error> {
//! match custody.eth().wallet("treasury").get().await {
//!     Ok(wallet) => println!("Wallet: {}", wallet),
//!     Err(Error::Api(ApiError::NotFound(message))) => {
//!         println!("No such wallet: {}", message);
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Distinguishing Timeouts
//!
//! ```rust,no_run
//! use custody_kit::Error;
//!
//! fn should_wait_longer(err: &Error) -> bool {
//!     err.is_timeout()
//! }
//! ```

use thiserror::Error;

use crate::client::HttpMethod;

// ============================================================================
// Transport Errors
// ============================================================================

/// Errors raised by the HTTP transport before any taxonomy mapping.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl HttpError {
    /// The HTTP status code, if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            HttpError::Status { status, .. } => Some(*status),
            HttpError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

// ============================================================================
// API Errors
// ============================================================================

/// Typed API errors, produced from HTTP statuses by [`ApiError::from_status`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("API error: {message} (status: {status})")]
    Api { status: u16, message: String },
}

impl ApiError {
    /// Map an HTTP status and response body onto the API error taxonomy.
    ///
    /// The message is taken from the body's `message` or `error` field when the
    /// body is a JSON object, otherwise the raw body is used.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = extract_message(body);
        match status {
            401 | 403 => ApiError::Authentication(message),
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Api { status, message },
        }
    }

    /// The HTTP status this error was mapped from.
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Authentication(_) => 401,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::Api { status, .. } => *status,
        }
    }
}

fn extract_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("message")
                .or_else(|| value.get("error"))
                .and_then(|m| m.as_str())
                .map(String::from)
        })
        .unwrap_or_else(|| body.to_string())
}

// ============================================================================
// Conversion Errors
// ============================================================================

/// A raw list entry could not be converted into a domain handle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("No {verb} link with relation '{rel}' found on item")]
    LinkNotFound { verb: HttpMethod, rel: String },

    #[error("Link '{href}' does not match pattern '{pattern}'")]
    Parse { href: String, pattern: String },

    #[error("Item is missing field '{0}'")]
    MissingField(&'static str),

    #[error("Invalid transaction hash: '{0}'")]
    InvalidHash(String),
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for custody-kit operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── Configuration ───
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid async request id: {0}")]
    InvalidRequestId(String),

    // ─── Polling ───
    #[error("Timed out waiting for {label}")]
    Timeout { label: String },

    // ─── Transport ───
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error(transparent)]
    Api(#[from] ApiError),

    // ─── Conversion ───
    #[error(transparent)]
    Convert(#[from] ConvertError),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns true if a bounded wait expired.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Error::Timeout { .. })
    }

    /// Returns true if the server reported the resource as missing.
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::Api(ApiError::NotFound(_)) => true,
            Error::Http(e) => e.status_code() == Some(404),
            _ => false,
        }
    }

    /// The HTTP status behind this error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Error::Api(e) => Some(e.status_code()),
            Error::Http(e) => e.status_code(),
            _ => None,
        }
    }
}
