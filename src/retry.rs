//! Exponential backoff around fallible async operations.
//!
//! [`RetryPolicy`] wraps any operation given as a closure that produces a
//! future. The delay after failed attempt *n* is `backoff_factor^(n-1)`
//! seconds, so the default policy waits 1s and then 2s before giving up on
//! the third failure:
//!
//! ```text
//! attempt 1 fails -> sleep factor^0
//! attempt 2 fails -> sleep factor^1
//! attempt 3 fails -> return the error (no trailing sleep)
//! ```
//!
//! Errors the predicate rejects are returned at once, and the error from the
//! final attempt is handed back unchanged.

use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::future::Future;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// Attempt budget and backoff multiplier for a retried operation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one.
    pub max_attempts: u32,
    /// Base of the exponential delay between attempts, in seconds.
    pub backoff_factor: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_factor: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_factor: f64) -> Self {
        Self {
            max_attempts,
            backoff_factor,
        }
    }

    /// Delay to wait after the given (1-indexed) failed attempt.
    pub fn delay_for(&self, failed_attempt: u32) -> Duration {
        let exponent = failed_attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        Duration::try_from_secs_f64(self.backoff_factor.powi(exponent)).unwrap_or(Duration::MAX)
    }

    /// Run `op` until it succeeds, the predicate refuses an error, or the
    /// attempt budget is spent. Sleeps on the tokio timer between attempts.
    pub async fn retry<T, E, Op, Fut, P>(&self, label: &str, is_retryable: P, op: Op) -> Result<T, E>
    where
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
    {
        self.retry_with_sleep(label, is_retryable, op, tokio::time::sleep)
            .await
    }

    /// Same loop as [`RetryPolicy::retry`] with a caller-supplied sleeper.
    pub async fn retry_with_sleep<T, E, Op, Fut, P, S, SFut>(
        &self,
        label: &str,
        is_retryable: P,
        mut op: Op,
        mut sleep: S,
    ) -> Result<T, E>
    where
        Op: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        P: Fn(&E) -> bool,
        E: Display,
        S: FnMut(Duration) -> SFut,
        SFut: Future<Output = ()>,
    {
        let max_attempts = self.max_attempts.max(1);
        let total_t0 = Instant::now();
        let mut attempt = 0u32;

        loop {
            attempt += 1;
            match op().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(
                            %label,
                            attempt,
                            max = max_attempts,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                            "Succeeded after retrying"
                        );
                    }
                    return Ok(value);
                }
                Err(e) => {
                    if !is_retryable(&e) {
                        debug!(%label, attempt, error = %e, "Error is not retryable");
                        return Err(e);
                    }

                    if attempt >= max_attempts {
                        error!(
                            %label,
                            attempt,
                            max = max_attempts,
                            elapsed_ms_total = total_t0.elapsed().as_millis() as u64,
                            error = %e,
                            "Exhausted retries"
                        );
                        return Err(e);
                    }

                    let delay = self.delay_for(attempt);
                    warn!(
                        %label,
                        attempt,
                        max = max_attempts,
                        ?delay,
                        error = %e,
                        "Attempt failed; backing off"
                    );
                    sleep(delay).await;
                }
            }
        }
    }
}
