//! Wallet monitor handle.

use serde::Serialize;

use crate::client::ApiClient;
use crate::convert::EventConverter;
use crate::error::Error;
use crate::pagination::Search;
use crate::types::Chain;

/// A monitor watching a wallet's activity, addressed by wallet name and id.
#[derive(Clone, Debug)]
pub struct Monitor {
    api: ApiClient,
    chain: Chain,
    wallet: String,
    id: String,
}

impl Monitor {
    pub fn new(
        api: ApiClient,
        chain: Chain,
        wallet: impl Into<String>,
        id: impl Into<String>,
    ) -> Self {
        Self {
            api,
            chain,
            wallet: wallet.into(),
            id: id.into(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the monitored wallet.
    pub fn wallet(&self) -> &str {
        &self.wallet
    }

    pub async fn get(&self) -> Result<serde_json::Value, Error> {
        self.api.get(&self.path(""), None).await
    }

    /// Patch the monitor's settings and return the updated monitor.
    pub async fn update<B: Serialize>(&self, changes: B) -> Result<serde_json::Value, Error> {
        self.api.patch(&self.path(""), &changes).await
    }

    pub async fn delete(&self) -> Result<(), Error> {
        let _: serde_json::Value = self.api.delete(&self.path("")).await?;
        Ok(())
    }

    /// Search the events this monitor captured.
    pub fn events(&self) -> Search<EventConverter> {
        Search::new(
            self.api.clone(),
            self.path("/events"),
            EventConverter::new(self.api.clone(), self.chain),
        )
    }

    fn path(&self, suffix: &str) -> String {
        self.chain.path(&format!(
            "wallet/{}/monitor/{}{}",
            self.wallet, self.id, suffix
        ))
    }
}
