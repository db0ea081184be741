//! Shared request entry point used by every handle and iterator.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;

use super::config::WaitConfig;
use super::transport::{ApiRequest, HttpMethod, QueryParams, Transport};
use super::wrap::{CallWrapper, StandardWrapper};

/// Transport plus wrapper, shared read-only by handles, cursors and requests.
///
/// Cloning is cheap; clones share the same transport and wrapper. The client
/// also carries the default [`WaitConfig`] handed to every async request it
/// creates.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
    wrapper: Arc<dyn CallWrapper>,
    wait: WaitConfig,
}

impl ApiClient {
    /// Create a client with the default [`StandardWrapper`].
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_wrapper(transport, Arc::new(StandardWrapper::new()))
    }

    /// Create a client with a custom wrapper.
    pub fn with_wrapper(transport: Arc<dyn Transport>, wrapper: Arc<dyn CallWrapper>) -> Self {
        Self {
            transport,
            wrapper,
            wait: WaitConfig::default(),
        }
    }

    /// Replace the default polling budget of async requests.
    pub fn with_wait_config(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    pub fn wait_config(&self) -> WaitConfig {
        self.wait
    }

    /// Execute a request through the wrapper and return the raw JSON body.
    pub async fn execute(&self, request: ApiRequest) -> Result<serde_json::Value, Error> {
        let call = self.transport.execute(request);
        self.wrapper.wrap(call).await
    }

    /// Execute a request and decode the body.
    pub async fn execute_as<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T, Error> {
        let value = self.execute(request).await?;
        Ok(serde_json::from_value(value)?)
    }

    /// GET `path`, optionally with query parameters.
    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: Option<&QueryParams>,
    ) -> Result<T, Error> {
        let mut request = ApiRequest::new(HttpMethod::Get, path);
        request.params = params.cloned();
        self.execute_as(request).await
    }

    /// POST a JSON body to `path`.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send_body(HttpMethod::Post, path, body).await
    }

    /// PATCH `path` with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send_body(HttpMethod::Patch, path, body).await
    }

    /// PUT a JSON body to `path`.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        self.send_body(HttpMethod::Put, path, body).await
    }

    /// DELETE `path`.
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, Error> {
        self.execute_as(ApiRequest::new(HttpMethod::Delete, path))
            .await
    }

    async fn send_body<T: DeserializeOwned, B: Serialize>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &B,
    ) -> Result<T, Error> {
        let body = serde_json::to_value(body)?;
        self.execute_as(ApiRequest::new(method, path).with_body(body))
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("wait", &self.wait)
            .finish_non_exhaustive()
    }
}
