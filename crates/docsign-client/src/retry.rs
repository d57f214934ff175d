//! Bounded retry with exponential backoff

use std::future::Future;
use std::time::Duration;

use docsign_common::Error;

/// Retry policy for idempotent calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts including the first one
    pub max_attempts: u32,
    /// Delay after the first failure
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_millis(200),
            max_backoff: Duration::from_secs(2),
        }
    }
}

impl RetryPolicy {
    /// Single attempt, no waiting
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
        }
    }

    /// Delays between consecutive attempts
    pub fn backoff(&self) -> Backoff {
        Backoff {
            next: self.initial_backoff,
            max: self.max_backoff,
            remaining: self.max_attempts.saturating_sub(1),
        }
    }

    /// Run `op` until it succeeds or the attempts are used up
    ///
    /// The last error is returned. Only [`Error::Network`] and [`Error::Server`]
    /// failures are retried; anything else is returned immediately.
    pub async fn retry<T, F, Fut>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut backoff = self.backoff();
        let mut attempt = 1;

        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if !is_transient(&err) => return Err(err),
                Err(err) => match backoff.next() {
                    Some(delay) => {
                        tracing::debug!(
                            "Attempt {} failed: {}, retrying in {}ms",
                            attempt,
                            err,
                            delay.as_millis()
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                    }
                    None => {
                        tracing::warn!("Giving up after {} attempts: {}", attempt, err);
                        return Err(err);
                    }
                },
            }
        }
    }
}

fn is_transient(err: &Error) -> bool {
    matches!(err, Error::Network(_) | Error::Server { .. })
}

/// Doubling delays, capped, for a fixed number of retries
#[derive(Debug, Clone)]
pub struct Backoff {
    next: Duration,
    max: Duration,
    remaining: u32,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;

        let current = self.next.min(self.max);
        self.next = self.next.saturating_mul(2).min(self.max);

        Some(current)
    }
}
