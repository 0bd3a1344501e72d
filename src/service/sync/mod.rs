//! Per-owner synchronization cycles.
//!
//! Each cycle (structures, notifications, assets) rotates through the
//! owner's valid credentials via a per-cycle cursor column, so concurrent
//! cycles of different kinds never contend for the same cursor. The worker
//! pool keeps two cycles of the same kind for one owner from overlapping.

pub mod assets;
pub mod notifications;
pub mod structures;

use std::future::Future;
use std::time::Duration;

use crate::{
    config::AppSettings,
    error::{retry::ErrorRetryStrategy, Error},
};

/// Run an ESI call with bounded retries for transient failures.
///
/// Rate limits sleep for the provider-supplied delay without consuming the
/// retry budget. Authorization and permanent errors fail immediately so the
/// caller can rotate to the next credential or abandon the cycle.
pub(crate) async fn with_esi_retries<T, F, Fut, E>(
    settings: &AppSettings,
    mut operation: F,
) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Into<Error>,
{
    let mut failures = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let err: Error = err.into();
                match err.to_retry_strategy() {
                    ErrorRetryStrategy::RetryAfter(secs) => {
                        tracing::info!("Rate limited, waiting {secs}s before retrying");
                        tokio::time::sleep(Duration::from_secs(secs)).await;
                    }
                    ErrorRetryStrategy::Retry => {
                        failures += 1;
                        if failures > settings.esi_max_retries {
                            return Err(err);
                        }
                        tracing::warn!("Transient failure (attempt {failures}), retrying: {err}");
                        tokio::time::sleep(settings.esi_retry_wait).await;
                    }
                    ErrorRetryStrategy::Fail => return Err(err),
                }
            }
        }
    }
}
