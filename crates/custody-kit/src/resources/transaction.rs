//! Transaction and event handles.

use crate::client::ApiClient;
use crate::convert::EventConverter;
use crate::error::Error;
use crate::pagination::Search;
use crate::types::Chain;

/// An on-chain transaction, addressed by hash.
#[derive(Clone, Debug)]
pub struct Transaction {
    api: ApiClient,
    chain: Chain,
    hash: String,
}

impl Transaction {
    pub fn new(api: ApiClient, chain: Chain, hash: impl Into<String>) -> Self {
        Self {
            api,
            chain,
            hash: hash.into(),
        }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Fetch the transaction details.
    pub async fn get(&self) -> Result<serde_json::Value, Error> {
        self.api.get(&self.path(""), None).await
    }

    /// Search the events the transaction emitted.
    pub fn events(&self) -> Search<EventConverter> {
        Search::new(
            self.api.clone(),
            self.path("/events"),
            EventConverter::new(self.api.clone(), self.chain),
        )
    }

    /// Event at log `index`, named `name`.
    pub fn event(&self, index: u64, name: impl Into<String>) -> Event {
        Event::new(self.api.clone(), self.chain, self.hash.clone(), index, name)
    }

    fn path(&self, suffix: &str) -> String {
        self.chain
            .path(&format!("transaction/{}{}", self.hash, suffix))
    }
}

/// A log event, addressed by transaction hash and log index.
#[derive(Clone, Debug)]
pub struct Event {
    api: ApiClient,
    chain: Chain,
    hash: String,
    index: u64,
    name: String,
}

impl Event {
    pub fn new(
        api: ApiClient,
        chain: Chain,
        hash: impl Into<String>,
        index: u64,
        name: impl Into<String>,
    ) -> Self {
        Self {
            api,
            chain,
            hash: hash.into(),
            index,
            name: name.into(),
        }
    }

    /// Hash of the emitting transaction.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fetch the decoded event.
    pub async fn get(&self) -> Result<serde_json::Value, Error> {
        let path = self
            .chain
            .path(&format!("transaction/{}/event/{}", self.hash, self.index));
        self.api.get(&path, None).await
    }
}
