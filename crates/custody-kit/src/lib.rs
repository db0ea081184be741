//! An ergonomic Rust client for blockchain custody services.
//!
//! **custody-kit** wraps a custody REST API (wallets, Ethereum and Bitcoin
//! transactions, smart contract calls, wallet monitors) behind typed handles,
//! with lazy hyperlink-driven pagination and bounded polling of long-running
//! requests.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use custody_kit::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), custody_kit::Error> {
//!     // Configure once
//!     let custody = Custody::from_env()?;
//!
//!     // Iterate every transaction, fetching pages on demand
//!     let mut txs = custody.eth().transactions().limit(100).items();
//!     println!("{} transactions", txs.hits().await?.total);
//!     while let Some(tx) = txs.next().await {
//!         println!("{}", tx?.hash());
//!     }
//!
//!     // Send from a custody wallet and wait for the hash
//!     let request = custody
//!         .eth()
//!         .wallet("treasury")
//!         .send(serde_json::json!({ "to": "0x52908400098527886E0F7030069857D2E4169EE7", "value": "1000" }))
//!         .await?;
//!     let status = request.wait().await?;
//!     println!("{:?}", status.output);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Design Principles
//!
//! 1. **Single entry point**: Everything hangs off the [`Custody`] client
//! 2. **Handles, not caches**: Domain handles hold identifiers only; each `get()` is a fresh request
//! 3. **One fetch per page**: Iterators fetch lazily and never request the same page twice
//! 4. **Bounded waits**: [`AsyncRequest::wait`] always ends, by completion, error or [`Error::Timeout`]
//!
//! # Pagination
//!
//! List endpoints return a [`Search`]. Pick how to consume it:
//!
//! - [`Search::items`] → [`ItemIterator`], a flat sequence of converted items
//! - [`Search::pages`] → [`PageIterator`], whole pages with `next()` and `previous()`
//! - [`Search::cursor`] → [`PageCursor`], the raw link-following cursor

pub mod client;
pub mod convert;
pub mod error;
pub mod pagination;
pub mod poll;
pub mod request;
pub mod resources;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, ConvertError, Error, HttpError};
pub use types::*;

// Re-export client types
pub use client::{
    ApiClient, ApiRequest, CallWrapper, Custody, CustodyBuilder, HttpMethod, HttpTransport,
    Passthrough, QueryParams, StandardWrapper, Transport, TransportFuture, WaitConfig,
};

// Re-export pagination and conversion types
pub use convert::{
    EventConverter, ItemConverter, MonitorConverter, PathPattern, TransactionConverter,
    WalletConverter,
};
pub use pagination::{
    EachItem, Hits, Hyperlink, ItemIterator, Page, PageConverter, PageCursor, PageIterator,
    PageLinks, RawItem, Search, SearchPage, SearchRequest,
};

// Re-export async request types
pub use poll::poll;
pub use request::{
    AsyncRequest, ProcessState, RequestStage, RequestStatus, TransactionOutput, WaitRequest,
};

// Re-export domain handles
pub use resources::{ChainApi, Contract, Event, Monitor, Transaction, Wallet};
