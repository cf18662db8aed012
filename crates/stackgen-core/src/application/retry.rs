//! Bounded retry with exponential backoff.
//!
//! The wait before retry `n` (0-based attempt that just failed) is
//! `base_delay * 2^n`. No wait follows the final attempt. Waits are
//! `tokio::time::sleep`, so other tasks keep running, and an optional
//! [`CancellationToken`] is checked before each attempt and raced against
//! each wait.

use std::{fmt, future::Future, time::Duration};

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Values below 1 behave as 1.
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Backoff after the 0-based `attempt` failed.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.checked_pow(attempt).unwrap_or(u32::MAX))
    }
}

/// Why [`with_retry`] gave up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    #[error("cancelled after {attempts} attempt(s)")]
    Cancelled { attempts: u32 },

    #[error("failed after {attempts} attempt(s): {error}")]
    Failed { error: E, attempts: u32 },
}

/// Run `operation` until it succeeds, fails with an error `is_retryable`
/// rejects, or the policy's attempt budget is spent.
///
/// `operation` receives the 0-based attempt number.
pub async fn with_retry<T, E, Op, Fut, Classify>(
    policy: &RetryPolicy,
    cancel: Option<&CancellationToken>,
    mut operation: Op,
    is_retryable: Classify,
) -> Result<T, RetryError<E>>
where
    Op: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    Classify: Fn(&E) -> bool,
    E: fmt::Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt: u32 = 0;

    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            debug!(attempts = attempt, "Retry sequence cancelled before attempt");
            return Err(RetryError::Cancelled { attempts: attempt });
        }

        let error = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(error) => error,
        };

        let attempts = attempt + 1;
        if attempts >= max_attempts || !is_retryable(&error) {
            return Err(RetryError::Failed { error, attempts });
        }

        let delay = policy.delay_for(attempt);
        warn!(
            attempt = attempts,
            max_attempts,
            delay_ms = delay.as_millis() as u64,
            error = %error,
            "Request failed with retryable error; retrying"
        );

        match cancel {
            Some(token) => {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!(attempts, "Retry sequence cancelled during backoff");
                        return Err(RetryError::Cancelled { attempts });
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            None => tokio::time::sleep(delay).await,
        }

        attempt = attempts;
    }
}
