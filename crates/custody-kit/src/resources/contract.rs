//! Smart contract handle.

use serde::Serialize;

use crate::client::ApiClient;
use crate::error::Error;
use crate::request::{AsyncRequest, TransactionOutput};
use crate::types::Chain;

/// A deployed smart contract, addressed by its address.
///
/// [`query`](Self::query) is a read answered synchronously;
/// [`call`](Self::call) sends a transaction from a custody wallet and
/// answers with an async request.
#[derive(Clone, Debug)]
pub struct Contract {
    api: ApiClient,
    chain: Chain,
    address: String,
}

impl Contract {
    pub fn new(api: ApiClient, chain: Chain, address: impl Into<String>) -> Self {
        Self {
            api,
            chain,
            address: address.into(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Evaluate a read-only method.
    pub async fn query<B: Serialize>(&self, query: B) -> Result<serde_json::Value, Error> {
        let path = self.chain.path(&format!("contract/{}/query", self.address));
        self.api.post(&path, &query).await
    }

    /// Invoke a state-changing method, signed by `wallet`.
    pub async fn call<B: Serialize>(
        &self,
        wallet: &str,
        call: B,
    ) -> Result<AsyncRequest<TransactionOutput>, Error> {
        let path = self
            .chain
            .path(&format!("wallet/{}/contract/{}/call", wallet, self.address));
        let body: serde_json::Value = self.api.post(&path, &call).await?;
        AsyncRequest::from_response(self.api.clone(), &body)
    }
}
