//! Call wrappers: cross-cutting policy applied around every transport call.
//!
//! Every request issued by the client, including page fetches and async
//! request polling, goes through a [`CallWrapper`]. Swapping the wrapper
//! changes error types and throughput without touching iteration logic.

use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::error::{ApiError, Error, HttpError};

use super::transport::TransportFuture;

/// Decorates a pending transport call.
///
/// The call is lazy: nothing is sent until the returned future is polled, so a
/// wrapper may delay it (rate limiting), observe it, or remap its error.
pub trait CallWrapper: Send + Sync {
    fn wrap<'a>(&'a self, call: TransportFuture<'a>) -> TransportFuture<'a>;
}

/// Wrapper that leaves calls untouched.
///
/// Transport errors reach the caller as raw [`HttpError`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct Passthrough;

impl CallWrapper for Passthrough {
    fn wrap<'a>(&'a self, call: TransportFuture<'a>) -> TransportFuture<'a> {
        call
    }
}

/// Default wrapper: optional concurrency limit plus error-taxonomy mapping.
///
/// Unmapped HTTP statuses ([`HttpError::Status`]) are converted with
/// [`ApiError::from_status`]; every other error passes through.
#[derive(Clone, Debug, Default)]
pub struct StandardWrapper {
    limit: Option<Arc<Semaphore>>,
}

impl StandardWrapper {
    /// Create a wrapper without a concurrency limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow at most `max` calls in flight at once across all clones.
    pub fn with_max_concurrent(max: usize) -> Self {
        Self {
            limit: Some(Arc::new(Semaphore::new(max.max(1)))),
        }
    }

    /// Remaining permits, if a limit is configured.
    pub fn available_permits(&self) -> Option<usize> {
        self.limit.as_ref().map(|s| s.available_permits())
    }
}

impl CallWrapper for StandardWrapper {
    fn wrap<'a>(&'a self, call: TransportFuture<'a>) -> TransportFuture<'a> {
        Box::pin(async move {
            let _permit = match &self.limit {
                // The semaphore is never closed, so acquire cannot fail.
                Some(semaphore) => semaphore.acquire().await.ok(),
                None => None,
            };
            call.await.map_err(map_status)
        })
    }
}

fn map_status(err: Error) -> Error {
    match err {
        Error::Http(HttpError::Status { status, body }) => {
            Error::Api(ApiError::from_status(status, &body))
        }
        other => other,
    }
}
