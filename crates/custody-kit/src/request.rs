//! Asynchronous requests.
//!
//! Long-running endpoints (sending a transaction, calling a contract) answer
//! with an opaque request id instead of a result. [`AsyncRequest`] wraps that id;
//! [`AsyncRequest::status`] fetches the current state once and
//! [`AsyncRequest::wait`] polls until the request completes.
//!
//! # Example
//!
//! ```rust,no_run
//! # use std::time::Duration;
//! # use custody_kit::*;
//! # async fn example(custody: Custody) -> Result<(), Error> {
//! let request = custody
//!     .eth()
//!     .wallet("treasury")
//!     .send(serde_json::json!({ "to": "0xabc...", "value": "1000" }))
//!     .await?;
//!
//! let status = request.wait().timeout(Duration::from_secs(60)).await?;
//! if let Some(output) = status.output {
//!     println!("Mined as {}", output.hash);
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::pin::Pin;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::client::{ApiClient, WaitConfig};
use crate::error::Error;
use crate::poll::poll;

// ============================================================================
// ProcessState
// ============================================================================

/// Server-side lifecycle of an async request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessState {
    Running,
    Completed,
    Failed,
    /// Any state this client does not know about, kept verbatim.
    Unknown(String),
}

impl ProcessState {
    pub fn as_str(&self) -> &str {
        match self {
            ProcessState::Running => "running",
            ProcessState::Completed => "completed",
            ProcessState::Failed => "failed",
            ProcessState::Unknown(raw) => raw,
        }
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ProcessState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.to_ascii_lowercase().as_str() {
            "running" => ProcessState::Running,
            "completed" => ProcessState::Completed,
            "failed" => ProcessState::Failed,
            _ => ProcessState::Unknown(raw),
        })
    }
}

impl Serialize for ProcessState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// ============================================================================
// RequestStatus
// ============================================================================

/// Free-form progress report attached to a status.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct RequestStage {
    #[serde(default)]
    pub stage: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Snapshot of an async request, as returned by `GET request/{id}`.
///
/// `output` stays `None` until `process` is [`ProcessState::Completed`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct RequestStatus<O = serde_json::Value> {
    pub process: ProcessState,
    #[serde(default)]
    pub status: RequestStage,
    #[serde(default)]
    pub created: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated: Option<DateTime<Utc>>,
    pub output: Option<O>,
}

impl<O> RequestStatus<O> {
    pub fn is_completed(&self) -> bool {
        self.process == ProcessState::Completed
    }

    pub fn is_failed(&self) -> bool {
        self.process == ProcessState::Failed
    }

    /// Post-process the output, keeping every other field unchanged.
    pub fn map_output<U>(self, f: impl FnOnce(O) -> U) -> RequestStatus<U> {
        RequestStatus {
            process: self.process,
            status: self.status,
            created: self.created,
            updated: self.updated,
            output: self.output.map(f),
        }
    }
}

/// Output of requests that submit a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct TransactionOutput {
    pub hash: String,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ============================================================================
// AsyncRequest
// ============================================================================

/// Handle to a server-side asynchronous request.
///
/// `O` is the shape of the request's `output` once completed.
pub struct AsyncRequest<O = serde_json::Value> {
    api: ApiClient,
    id: String,
    wait: WaitConfig,
    _output: PhantomData<fn() -> O>,
}

impl<O> AsyncRequest<O> {
    /// Wrap an existing request id.
    ///
    /// Fails with [`Error::InvalidRequestId`] if the id is empty.
    pub fn new(api: ApiClient, id: impl Into<String>) -> Result<Self, Error> {
        let id = id.into();
        if id.is_empty() {
            return Err(Error::InvalidRequestId("request id is empty".to_string()));
        }
        Ok(Self {
            wait: api.wait_config(),
            api,
            id,
            _output: PhantomData,
        })
    }

    /// Build a handle from an async endpoint's `{ "id": "..." }` answer.
    pub fn from_response(api: ApiClient, body: &serde_json::Value) -> Result<Self, Error> {
        match body.get("id") {
            Some(serde_json::Value::String(id)) => Self::new(api, id.clone()),
            Some(other) => Err(Error::InvalidRequestId(format!(
                "expected a string id, got {}",
                other
            ))),
            None => Err(Error::InvalidRequestId(
                "response carries no request id".to_string(),
            )),
        }
    }

    /// Use `config` as the default budget for [`wait`](Self::wait), instead of
    /// the client's.
    pub fn with_wait_config(mut self, config: WaitConfig) -> Self {
        self.wait = config;
        self
    }

    /// The server-assigned request id.
    pub fn id(&self) -> &str {
        &self.id
    }

    fn status_path(&self) -> String {
        format!("request/{}", urlencoding::encode(&self.id))
    }
}

impl<O: DeserializeOwned> AsyncRequest<O> {
    /// Fetch the current status once.
    pub async fn status(&self) -> Result<RequestStatus<O>, Error> {
        self.api.get(&self.status_path(), None).await
    }
}

impl<O: DeserializeOwned + Send + 'static> AsyncRequest<O> {
    /// Poll the status until the request reports `completed`.
    ///
    /// Only the `process` field gates completion: a request that ends in
    /// `failed` keeps being polled until the timeout. Use
    /// [`WaitRequest::until`] to stop on other states.
    pub fn wait(&self) -> WaitRequest<O> {
        WaitRequest {
            request: self.clone(),
            timeout: self.wait.timeout(),
            interval: self.wait.interval(),
            until: Box::new(RequestStatus::is_completed),
        }
    }
}

impl<O> Clone for AsyncRequest<O> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            id: self.id.clone(),
            wait: self.wait,
            _output: PhantomData,
        }
    }
}

impl<O> fmt::Debug for AsyncRequest<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncRequest")
            .field("id", &self.id)
            .field("wait", &self.wait)
            .finish()
    }
}

// ============================================================================
// WaitRequest
// ============================================================================

type StatusPredicate<O> = Box<dyn Fn(&RequestStatus<O>) -> bool + Send + Sync>;

/// Builder for waiting on an async request.
///
/// Created by [`AsyncRequest::wait`]; `.await` it to start polling.
pub struct WaitRequest<O> {
    request: AsyncRequest<O>,
    timeout: Duration,
    interval: Duration,
    until: StatusPredicate<O>,
}

impl<O> WaitRequest<O> {
    /// Total time budget.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Delay between status probes.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Replace the completion check.
    ///
    /// ```rust,no_run
    /// # use custody_kit::*;
    /// # async fn example(request: AsyncRequest) -> Result<(), Error> {
    /// let status = request
    ///     .wait()
    ///     .until(|s| s.is_completed() || s.is_failed())
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn until(
        mut self,
        predicate: impl Fn(&RequestStatus<O>) -> bool + Send + Sync + 'static,
    ) -> Self {
        self.until = Box::new(predicate);
        self
    }
}

impl<O: DeserializeOwned + Send + 'static> IntoFuture for WaitRequest<O> {
    type Output = Result<RequestStatus<O>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            let label = format!("request {}", self.request.id);
            let request = &self.request;
            let until = &self.until;
            poll(
                || request.status(),
                |status| until(status),
                &label,
                self.timeout,
                self.interval,
            )
            .await
        })
    }
}
