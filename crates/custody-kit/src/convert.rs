//! Conversion of raw list entries into domain handles.
//!
//! A list entry's scalar fields are rarely enough to address the resource it
//! describes (a monitor entry does not carry its wallet name, for instance).
//! Converters locate the entry's `GET` hyperlink for the expected relation and
//! read the identifiers out of its path.

use crate::client::{ApiClient, HttpMethod};
use crate::error::ConvertError;
use crate::pagination::{Hyperlink, RawItem};
use crate::resources::{Event, Monitor, Transaction, Wallet};
use crate::types::Chain;

// ============================================================================
// ItemConverter
// ============================================================================

/// Turns one [`RawItem`] into a typed value.
///
/// Implemented by the built-in converters and by any
/// `Fn(&RawItem) -> Result<T, ConvertError>` closure.
pub trait ItemConverter {
    type Output;

    fn convert(&self, item: &RawItem) -> Result<Self::Output, ConvertError>;
}

impl<F, T> ItemConverter for F
where
    F: Fn(&RawItem) -> Result<T, ConvertError>,
{
    type Output = T;

    fn convert(&self, item: &RawItem) -> Result<T, ConvertError> {
        self(item)
    }
}

/// Find the link with the given verb and relation.
pub fn find_link<'a>(
    item: &'a RawItem,
    verb: HttpMethod,
    rel: &str,
) -> Result<&'a Hyperlink, ConvertError> {
    item.links
        .iter()
        .find(|link| link.method == verb && link.rel == rel)
        .ok_or_else(|| ConvertError::LinkNotFound {
            verb,
            rel: rel.to_string(),
        })
}

// ============================================================================
// PathPattern
// ============================================================================

/// Positional path matcher such as `wallet/{wallet}/monitor/{id}`.
///
/// The pattern is matched against the trailing segments of an href; query
/// string, fragment and any `scheme://host` prefix are ignored. Placeholders
/// capture exactly one non-empty segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathPattern(&'static str);

impl PathPattern {
    pub const fn new(pattern: &'static str) -> Self {
        Self(pattern)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }

    /// Placeholder values in pattern order.
    pub fn captures<'h>(&self, href: &'h str) -> Result<Vec<&'h str>, ConvertError> {
        let expected: Vec<&str> = segments(self.0).collect();
        let actual: Vec<&str> = segments(path_of(href)).collect();

        if actual.len() < expected.len() {
            return Err(self.mismatch(href));
        }
        let tail = &actual[actual.len() - expected.len()..];

        let mut captured = Vec::new();
        for (want, got) in expected.iter().zip(tail) {
            if want.starts_with('{') && want.ends_with('}') {
                captured.push(*got);
            } else if want != got {
                return Err(self.mismatch(href));
            }
        }
        Ok(captured)
    }

    fn mismatch(&self, href: &str) -> ConvertError {
        ConvertError::Parse {
            href: href.to_string(),
            pattern: self.0.to_string(),
        }
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn path_of(href: &str) -> &str {
    let end = href.find(['?', '#']).unwrap_or(href.len());
    let href = &href[..end];
    match href.find("://") {
        Some(scheme_end) => {
            let rest = &href[scheme_end + 3..];
            rest.find('/').map_or("", |slash| &rest[slash..])
        }
        None => href,
    }
}

fn validate_hash(chain: Chain, hash: &str) -> Result<(), ConvertError> {
    let digits = match chain {
        Chain::Ethereum => hash
            .strip_prefix("0x")
            .ok_or_else(|| ConvertError::InvalidHash(hash.to_string()))?,
        Chain::Bitcoin => hash,
    };
    if digits.is_empty() || hex::decode(digits).is_err() {
        return Err(ConvertError::InvalidHash(hash.to_string()));
    }
    Ok(())
}

// ============================================================================
// Converters
// ============================================================================

const TRANSACTION_PATH: PathPattern = PathPattern::new("transaction/{hash}");
const EVENT_PATH: PathPattern = PathPattern::new("transaction/{hash}/event/{index}");
const MONITOR_PATH: PathPattern = PathPattern::new("wallet/{wallet}/monitor/{id}");
const WALLET_PATH: PathPattern = PathPattern::new("wallet/{name}");

/// List entry → [`Transaction`], via its `transaction` link.
#[derive(Clone, Debug)]
pub struct TransactionConverter {
    api: ApiClient,
    chain: Chain,
}

impl TransactionConverter {
    pub fn new(api: ApiClient, chain: Chain) -> Self {
        Self { api, chain }
    }
}

impl ItemConverter for TransactionConverter {
    type Output = Transaction;

    fn convert(&self, item: &RawItem) -> Result<Transaction, ConvertError> {
        let link = find_link(item, HttpMethod::Get, "transaction")?;
        let captured = TRANSACTION_PATH.captures(&link.href)?;
        let hash = captured[0];
        validate_hash(self.chain, hash)?;
        Ok(Transaction::new(self.api.clone(), self.chain, hash))
    }
}

/// List entry → [`Event`], via its `event` link plus the `event` name field.
#[derive(Clone, Debug)]
pub struct EventConverter {
    api: ApiClient,
    chain: Chain,
}

impl EventConverter {
    pub fn new(api: ApiClient, chain: Chain) -> Self {
        Self { api, chain }
    }
}

impl ItemConverter for EventConverter {
    type Output = Event;

    fn convert(&self, item: &RawItem) -> Result<Event, ConvertError> {
        let link = find_link(item, HttpMethod::Get, "event")?;
        let captured = EVENT_PATH.captures(&link.href)?;
        validate_hash(self.chain, captured[0])?;
        let index = captured[1]
            .parse::<u64>()
            .map_err(|_| EVENT_PATH.mismatch(&link.href))?;
        let name = item
            .field_str("event")
            .ok_or(ConvertError::MissingField("event"))?;
        Ok(Event::new(
            self.api.clone(),
            self.chain,
            captured[0],
            index,
            name,
        ))
    }
}

/// List entry → [`Monitor`], via its `monitor` link.
///
/// The wallet name only exists in the link; the id prefers the entry's
/// `monitor` field and falls back to the link.
#[derive(Clone, Debug)]
pub struct MonitorConverter {
    api: ApiClient,
    chain: Chain,
}

impl MonitorConverter {
    pub fn new(api: ApiClient, chain: Chain) -> Self {
        Self { api, chain }
    }
}

impl ItemConverter for MonitorConverter {
    type Output = Monitor;

    fn convert(&self, item: &RawItem) -> Result<Monitor, ConvertError> {
        let link = find_link(item, HttpMethod::Get, "monitor")?;
        let captured = MONITOR_PATH.captures(&link.href)?;
        let id = item
            .field_str("monitor")
            .unwrap_or_else(|| captured[1].to_string());
        Ok(Monitor::new(self.api.clone(), self.chain, captured[0], id))
    }
}

/// List entry → [`Wallet`], via its `wallet` link.
#[derive(Clone, Debug)]
pub struct WalletConverter {
    api: ApiClient,
    chain: Chain,
}

impl WalletConverter {
    pub fn new(api: ApiClient, chain: Chain) -> Self {
        Self { api, chain }
    }
}

impl ItemConverter for WalletConverter {
    type Output = Wallet;

    fn convert(&self, item: &RawItem) -> Result<Wallet, ConvertError> {
        let link = find_link(item, HttpMethod::Get, "wallet")?;
        let captured = WALLET_PATH.captures(&link.href)?;
        Ok(Wallet::new(self.api.clone(), self.chain, captured[0]))
    }
}
