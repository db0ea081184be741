//! Domain handles.
//!
//! Each handle stores only the identifiers of one remote resource plus a
//! clone of the [`ApiClient`](crate::client::ApiClient). Nothing is cached:
//! every `get()` performs a fresh request.

mod chain;
mod contract;
mod monitor;
mod transaction;
mod wallet;

pub use chain::ChainApi;
pub use contract::Contract;
pub use monitor::Monitor;
pub use transaction::{Event, Transaction};
pub use wallet::Wallet;
