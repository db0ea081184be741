//! Per-chain entry point.

use crate::client::ApiClient;
use crate::convert::{TransactionConverter, WalletConverter};
use crate::pagination::Search;
use crate::types::Chain;

use super::{Contract, Transaction, Wallet};

/// Resources of one chain. Create via [`Custody::eth`](crate::Custody::eth)
/// or [`Custody::btc`](crate::Custody::btc).
#[derive(Clone, Debug)]
pub struct ChainApi {
    api: ApiClient,
    chain: Chain,
}

impl ChainApi {
    pub fn new(api: ApiClient, chain: Chain) -> Self {
        Self { api, chain }
    }

    pub fn chain(&self) -> Chain {
        self.chain
    }

    /// Search the chain's transactions.
    pub fn transactions(&self) -> Search<TransactionConverter> {
        Search::new(
            self.api.clone(),
            self.chain.path("transactions"),
            TransactionConverter::new(self.api.clone(), self.chain),
        )
    }

    pub fn transaction(&self, hash: impl Into<String>) -> Transaction {
        Transaction::new(self.api.clone(), self.chain, hash)
    }

    /// Search the custody wallets on this chain.
    pub fn wallets(&self) -> Search<WalletConverter> {
        Search::new(
            self.api.clone(),
            self.chain.path("wallets"),
            WalletConverter::new(self.api.clone(), self.chain),
        )
    }

    pub fn wallet(&self, name: impl Into<String>) -> Wallet {
        Wallet::new(self.api.clone(), self.chain, name)
    }

    /// Smart contract at `address`.
    pub fn contract(&self, address: impl Into<String>) -> Contract {
        Contract::new(self.api.clone(), self.chain, address)
    }
}
