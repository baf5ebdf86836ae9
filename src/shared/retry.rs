//! Bounded retry with linear backoff
//!
//! Retries a whole unit of work (typically one database transaction) when it
//! fails with a transient error. Terminal errors are returned untouched;
//! running out of attempts is reported as [`BookingError::RetriesExhausted`].

use std::future::Future;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::BookingError;

/// Configuration for retry behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first one).
    pub max_attempts: u32,
    /// Delay before retry `n` is `backoff_base * n`.
    pub backoff_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff_base: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_base: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_base,
        }
    }

    /// Delay to wait after failed attempt number `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.backoff_base.saturating_mul(attempt)
    }

    /// Run `operation` until it succeeds, fails terminally, or the attempt
    /// ceiling is reached.
    ///
    /// # Example
    /// ```ignore
    /// let policy = RetryPolicy::default();
    /// policy
    ///     .run("insert reservation", || repo.insert_once(&reservation))
    ///     .await?;
    /// ```
    pub async fn run<F, Fut, T>(&self, operation_name: &str, mut operation: F) -> Result<T, BookingError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, BookingError>>,
    {
        for attempt in 1..=self.max_attempts {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        info!(operation = operation_name, attempt, "Succeeded after retry");
                    }
                    return Ok(value);
                }
                Err(err) if err.is_transient() => {
                    metrics::counter!(
                        "db_transaction_retries_total",
                        "operation" => operation_name.to_string()
                    )
                    .increment(1);

                    if attempt == self.max_attempts {
                        warn!(
                            operation = operation_name,
                            attempt,
                            max_attempts = self.max_attempts,
                            error = %err,
                            "Transient failure on final attempt"
                        );
                        break;
                    }

                    let delay = self.backoff(attempt);
                    warn!(
                        operation = operation_name,
                        attempt,
                        max_attempts = self.max_attempts,
                        error = %err,
                        retry_in_ms = delay.as_millis() as u64,
                        "Transient failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err),
            }
        }

        Err(BookingError::RetriesExhausted {
            operation: operation_name.to_string(),
            attempts: self.max_attempts,
        })
    }
}
