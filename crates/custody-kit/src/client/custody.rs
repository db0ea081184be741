//! The main Custody client.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;
use crate::request::AsyncRequest;
use crate::resources::ChainApi;
use crate::types::Chain;

use super::api::ApiClient;
use super::config::WaitConfig;
use super::http::HttpTransport;
use super::transport::Transport;
use super::wrap::{CallWrapper, StandardWrapper};

/// The main client for a custody service.
///
/// `Custody` is the single entry point: chain-scoped resources hang off
/// [`eth`](Self::eth) and [`btc`](Self::btc), and stored async request ids
/// are rebuilt with [`request`](Self::request). Cloning is cheap.
///
/// # Example
///
/// ```rust,no_run
/// use custody_kit::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), custody_kit::Error> {
///     let custody = Custody::builder("https://custody.example.com/api/v1")
///         .api_key("sk_live_...")
///         .max_concurrent_requests(8)
///         .build()?;
///
///     let mut wallets = custody.eth().wallets().items();
///     while let Some(wallet) = wallets.next().await {
///         println!("{}", wallet?.name());
///     }
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct Custody {
    api: ApiClient,
}

impl Custody {
    /// Create a builder for the service at `base_url`.
    pub fn builder(base_url: impl Into<String>) -> CustodyBuilder {
        CustodyBuilder::new(base_url)
    }

    /// Create a configured client from environment variables.
    ///
    /// Reads the following environment variables:
    /// - `CUSTODY_API_URL` (required): base URL of the service.
    /// - `CUSTODY_API_KEY` (optional): bearer token.
    /// - `CUSTODY_MAX_CONCURRENT` (optional): cap on in-flight requests.
    /// - `CUSTODY_HTTP_TIMEOUT_SECS` (optional): per-request HTTP timeout.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL is missing or invalid, or if a
    /// numeric variable does not parse.
    pub fn from_env() -> Result<Custody, Error> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Custody, Error> {
        let url = var("CUSTODY_API_URL")
            .ok_or_else(|| Error::Config("CUSTODY_API_URL is not set".into()))?;

        let mut builder = Custody::builder(url);
        if let Some(key) = var("CUSTODY_API_KEY") {
            builder = builder.api_key(key);
        }
        if let Some(max) = var("CUSTODY_MAX_CONCURRENT") {
            let max = parse_positive("CUSTODY_MAX_CONCURRENT", &max)?;
            builder = builder.max_concurrent_requests(max as usize);
        }
        if let Some(secs) = var("CUSTODY_HTTP_TIMEOUT_SECS") {
            let secs = parse_positive("CUSTODY_HTTP_TIMEOUT_SECS", &secs)?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Ethereum resources.
    pub fn eth(&self) -> ChainApi {
        self.chain(Chain::Ethereum)
    }

    /// Bitcoin resources.
    pub fn btc(&self) -> ChainApi {
        self.chain(Chain::Bitcoin)
    }

    pub fn chain(&self, chain: Chain) -> ChainApi {
        ChainApi::new(self.api.clone(), chain)
    }

    /// Rebuild a handle to an async request from its stored id.
    pub fn request(&self, id: impl Into<String>) -> Result<AsyncRequest, Error> {
        AsyncRequest::new(self.api.clone(), id)
    }

    /// The underlying API client, for endpoints without a dedicated handle.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }
}

impl std::fmt::Debug for Custody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Custody").field("api", &self.api).finish()
    }
}

fn parse_positive(name: &str, raw: &str) -> Result<u64, Error> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(Error::Config(format!(
            "{} must be a positive integer, got '{}'",
            name, raw
        ))),
    }
}

/// Builder for creating a [`Custody`] client.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
/// use custody_kit::*;
///
/// # fn example() -> Result<(), custody_kit::Error> {
/// let custody = Custody::builder("https://custody.example.com/api/v1")
///     .api_key("sk_live_...")
///     .timeout(Duration::from_secs(30))
///     .wait_config(WaitConfig { timeout_ms: 60_000, interval_ms: 1_000 })
///     .build()?;
/// # Ok(())
/// # }
/// ```
pub struct CustodyBuilder {
    base_url: String,
    api_key: Option<String>,
    timeout: Option<Duration>,
    max_concurrent: Option<usize>,
    wait: WaitConfig,
    wrapper: Option<Arc<dyn CallWrapper>>,
    transport: Option<Arc<dyn Transport>>,
}

impl CustodyBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            timeout: None,
            max_concurrent: None,
            wait: WaitConfig::default(),
            wrapper: None,
            transport: None,
        }
    }

    /// Bearer token sent with every request.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Cap on requests in flight at once, shared by every handle and iterator.
    ///
    /// Ignored when a custom [`wrapper`](Self::wrapper) is set.
    pub fn max_concurrent_requests(mut self, max: usize) -> Self {
        self.max_concurrent = Some(max);
        self
    }

    /// Default polling budget of async requests.
    pub fn wait_config(mut self, config: WaitConfig) -> Self {
        self.wait = config;
        self
    }

    /// Replace the default [`StandardWrapper`].
    pub fn wrapper(mut self, wrapper: impl CallWrapper + 'static) -> Self {
        self.wrapper = Some(Arc::new(wrapper));
        self
    }

    /// Replace the HTTP transport entirely.
    ///
    /// The base URL, API key and timeout are not used in that case.
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<Custody, Error> {
        let transport = match self.transport {
            Some(transport) => transport,
            None => {
                let http = match self.timeout {
                    Some(timeout) => HttpTransport::with_timeout(&self.base_url, timeout),
                    None => HttpTransport::new(&self.base_url),
                }
                .map_err(|e| Error::Config(format!("invalid base URL: {}", e)))?;
                let http = match self.api_key {
                    Some(key) => http.api_key(key),
                    None => http,
                };
                Arc::new(http) as Arc<dyn Transport>
            }
        };

        let wrapper: Arc<dyn CallWrapper> = match (self.wrapper, self.max_concurrent) {
            (Some(wrapper), _) => wrapper,
            (None, Some(max)) => Arc::new(StandardWrapper::with_max_concurrent(max)),
            (None, None) => Arc::new(StandardWrapper::new()),
        };

        Ok(Custody {
            api: ApiClient::with_wrapper(transport, wrapper).with_wait_config(self.wait),
        })
    }
}
