//! Integration tests for custody-kit.
//!
//! These tests drive the real `reqwest` transport against a local `mockito`
//! server.
//!
//! Run with: `cargo test --test integration`

mod error_handling_integration;
mod pagination_integration;
mod request_integration;

/// Route `tracing` output through the test harness. Filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
