//! Client module for talking to a custody service.
//!
//! This module provides the client infrastructure:
//!
//! - [`Custody`]: The main client, the single entry point for all operations
//! - [`CustodyBuilder`]: Fluent builder for configuring the client
//! - [`ApiClient`]: Transport plus call wrapper, shared by every handle
//!
//! # Transport and wrappers
//!
//! Every request goes through a [`Transport`] (how bytes reach the server)
//! and a [`CallWrapper`] (policy applied around each call):
//!
//! | Type | Role |
//! |------|------|
//! | [`HttpTransport`] | `reqwest` transport with bearer authentication |
//! | [`StandardWrapper`] | Concurrency limit plus HTTP status → [`ApiError`](crate::ApiError) mapping |
//! | [`Passthrough`] | No-op wrapper, raw [`HttpError`](crate::HttpError)s reach the caller |

mod api;
mod config;
mod custody;
mod http;
mod transport;
mod wrap;

#[cfg(test)]
pub(crate) mod mock;

pub use api::ApiClient;
pub use config::{DEFAULT_WAIT_INTERVAL_MS, DEFAULT_WAIT_TIMEOUT_MS, WaitConfig};
pub use custody::{Custody, CustodyBuilder};
pub use http::HttpTransport;
pub use transport::{ApiRequest, HttpMethod, QueryParams, Transport, TransportFuture};
pub use wrap::{CallWrapper, Passthrough, StandardWrapper};
