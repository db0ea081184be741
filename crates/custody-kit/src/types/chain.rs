//! Chain identification.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The blockchain a resource lives on.
///
/// Every chain-scoped endpoint is rooted at the chain's path prefix
/// (`eth/...`, `btc/...`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chain {
    /// Ethereum and its smart contracts.
    #[serde(rename = "eth")]
    Ethereum,
    /// Bitcoin.
    #[serde(rename = "btc")]
    Bitcoin,
}

impl Chain {
    /// Returns true if this is Ethereum.
    pub fn is_ethereum(&self) -> bool {
        matches!(self, Chain::Ethereum)
    }

    /// Returns true if this is Bitcoin.
    pub fn is_bitcoin(&self) -> bool {
        matches!(self, Chain::Bitcoin)
    }

    /// Returns the URL path prefix.
    pub fn as_str(&self) -> &'static str {
        match self {
            Chain::Ethereum => "eth",
            Chain::Bitcoin => "btc",
        }
    }

    /// Join `rest` under this chain's prefix.
    pub(crate) fn path(&self, rest: &str) -> String {
        format!("{}/{}", self.as_str(), rest.trim_start_matches('/'))
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Chain {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "eth" | "ethereum" => Ok(Chain::Ethereum),
            "btc" | "bitcoin" => Ok(Chain::Bitcoin),
            other => Err(Error::Config(format!("unknown chain '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_display() {
        assert_eq!(Chain::Ethereum.to_string(), "eth");
        assert_eq!(Chain::Bitcoin.to_string(), "btc");
    }

    #[test]
    fn test_chain_predicates() {
        assert!(Chain::Ethereum.is_ethereum());
        assert!(!Chain::Ethereum.is_bitcoin());
        assert!(Chain::Bitcoin.is_bitcoin());
    }

    #[test]
    fn test_chain_path() {
        assert_eq!(Chain::Ethereum.path("wallets"), "eth/wallets");
        assert_eq!(Chain::Bitcoin.path("/wallet/cold"), "btc/wallet/cold");
    }

    #[test]
    fn test_chain_from_str() {
        assert_eq!("ETH".parse::<Chain>().unwrap(), Chain::Ethereum);
        assert_eq!("bitcoin".parse::<Chain>().unwrap(), Chain::Bitcoin);
        assert!("doge".parse::<Chain>().is_err());
    }
}
