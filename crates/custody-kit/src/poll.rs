//! Bounded-time polling.
//!
//! [`poll`] drives a probe on a single task: probe, check, sleep, repeat. The
//! whole loop runs under one deadline, so every exit path (success, probe
//! failure, timeout) drops the pending sleep and deadline together and no
//! timer outlives the call.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace};

use crate::error::Error;

/// Repeatedly invoke `probe` until `is_done` accepts its result.
///
/// - The first probe runs immediately.
/// - Subsequent probes run `interval` after the previous one settled; the
///   probe is never invoked concurrently with itself.
/// - A probe error stops the loop and is returned unchanged.
/// - If `timeout` elapses first, the in-flight probe or sleep is dropped and
///   [`Error::Timeout`] carrying `label` is returned.
///
/// # Example
///
/// ```rust,no_run
/// # use std::time::Duration;
/// # use custody_kit::{poll, Error};
/// # async fn example() -> Result<(), Error> {
/// let mut height = 0u64;
/// let reached = poll(
///     || {
///         height += 1;
///         let h = height;
///         async move { Ok::<_, Error>(h) }
///     },
///     |h| *h >= 3,
///     "block height",
///     Duration::from_secs(5),
///     Duration::from_millis(100),
/// )
/// .await?;
/// assert_eq!(reached, 3);
/// # Ok(())
/// # }
/// ```
pub async fn poll<T, P, Fut, D>(
    mut probe: P,
    mut is_done: D,
    label: &str,
    timeout: Duration,
    interval: Duration,
) -> Result<T, Error>
where
    P: FnMut() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
    D: FnMut(&T) -> bool,
{
    let started = tokio::time::Instant::now();

    let ticks = async {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            trace!(label, attempt, "probing");
            let value = probe().await?;
            if is_done(&value) {
                debug!(label, attempts = attempt, "poll condition met");
                return Ok::<T, Error>(value);
            }
            tokio::time::sleep(interval).await;
        }
    };

    match tokio::time::timeout(timeout, ticks).await {
        Ok(result) => result,
        Err(_) => {
            debug!(
                label,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "poll timed out"
            );
            Err(Error::Timeout {
                label: label.to_string(),
            })
        }
    }
}
