//! Core value types shared across the client.

mod chain;

pub use chain::Chain;
