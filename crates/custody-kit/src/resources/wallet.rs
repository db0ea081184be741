//! Custody wallet handle.

use serde::Serialize;

use crate::client::ApiClient;
use crate::convert::MonitorConverter;
use crate::error::{ConvertError, Error};
use crate::pagination::Search;
use crate::request::{AsyncRequest, TransactionOutput};
use crate::types::Chain;

use super::Monitor;

/// A wallet held by the custody service, addressed by name.
///
/// # Example
///
/// ```rust,no_run
/// # use custody_kit::*;
/// # async fn example(custody: Custody) -> Result<(), Error> {
/// let treasury = custody.eth().wallet("treasury");
/// println!("{}", treasury.balance().await?);
///
/// let request = treasury
///     .send(serde_json::json!({ "to": "0x52908400098527886E0F7030069857D2E4169EE7", "value": "1000" }))
///     .await?;
/// let done = request.wait().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Wallet {
    api: ApiClient,
    chain: Chain,
    name: String,
}

impl Wallet {
    pub fn new(api: ApiClient, chain: Chain, name: impl Into<String>) -> Self {
        Self {
            api,
            chain,
            name: name.into(),
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn get(&self) -> Result<serde_json::Value, Error> {
        self.api.get(&self.path(""), None).await
    }

    pub async fn balance(&self) -> Result<serde_json::Value, Error> {
        self.api.get(&self.path("/balance"), None).await
    }

    /// Submit a transaction from this wallet.
    ///
    /// The service signs and broadcasts asynchronously; the returned request
    /// resolves to the transaction hash.
    pub async fn send<B: Serialize>(
        &self,
        transaction: B,
    ) -> Result<AsyncRequest<TransactionOutput>, Error> {
        let body: serde_json::Value = self
            .api
            .post(&self.path("/transaction"), &transaction)
            .await?;
        AsyncRequest::from_response(self.api.clone(), &body)
    }

    /// Search the monitors attached to this wallet.
    pub fn monitors(&self) -> Search<MonitorConverter> {
        Search::new(
            self.api.clone(),
            self.path("/monitors"),
            MonitorConverter::new(self.api.clone(), self.chain),
        )
    }

    pub fn monitor(&self, id: impl Into<String>) -> Monitor {
        Monitor::new(self.api.clone(), self.chain, self.name.clone(), id)
    }

    /// Create a monitor and return its handle.
    pub async fn create_monitor<B: Serialize>(&self, monitor: B) -> Result<Monitor, Error> {
        let body: serde_json::Value = self.api.post(&self.path("/monitor"), &monitor).await?;
        let id = body
            .get("id")
            .and_then(|id| id.as_str())
            .ok_or(ConvertError::MissingField("id"))?;
        Ok(self.monitor(id))
    }

    fn path(&self, suffix: &str) -> String {
        self.chain.path(&format!("wallet/{}{}", self.name, suffix))
    }
}
