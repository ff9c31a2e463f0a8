//! Bounded retry on a fixed interval.

use std::future::Future;
use std::time::Duration;

use cheapswitch_domain::error::CheapSwitchError;

/// How often, and how many times, to attempt an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    /// Every 10 minutes for 23 hours.
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(10 * 60),
            max_attempts: 23 * 6,
        }
    }
}

/// Run `op` until it succeeds, fails with a non-transient error, or
/// `policy.max_attempts` attempts have been made.
///
/// Sleeps `policy.interval` between attempts, never before the first one.
///
/// # Errors
///
/// Returns the last error produced by `op`.
pub async fn retry<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T, CheapSwitchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CheapSwitchError>>,
{
    let mut attempt = 1;
    loop {
        match op().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, "succeeded after retrying");
                }
                return Ok(value);
            }
            Err(err) if err.is_transient() && attempt < policy.max_attempts => {
                tracing::warn!(attempt, error = %err, "transient failure, retrying");
                tokio::time::sleep(policy.interval).await;
                attempt += 1;
            }
            Err(err) => {
                tracing::error!(attempt, error = %err, "giving up");
                return Err(err);
            }
        }
    }
}
