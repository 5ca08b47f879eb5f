//! Retry with exponential backoff for background work.
//!
//! Background tasks (vote conclusion, ledger submission) have no user to report to, so
//! transient failures are retried a bounded number of times before being logged and dropped.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Retry policy: number of attempts and the delay growth between them.
#[derive(Debug, Clone, Copy)]
pub struct Backoff {
    /// Total attempts including the first one. Zero is treated as one.
    pub attempts: u32,
    /// Delay before the second attempt; doubled after every further failure.
    pub initial_delay: Duration,
    /// Upper bound for a single delay.
    pub max_delay: Duration,
}

impl Default for Backoff {
    fn default() -> Self {
        Self {
            attempts: 4,
            initial_delay: Duration::from_secs(30),
            max_delay: Duration::from_secs(10 * 60),
        }
    }
}

impl Backoff {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.initial_delay
            .checked_mul(factor)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }
}

/// Runs `operation` until it succeeds or the policy's attempts are exhausted.
///
/// Every failure is logged with `label`; the last error is returned.
pub async fn retry_with_backoff<T, E, F, Fut>(
    label: &str,
    backoff: Backoff,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let attempts = backoff.attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt >= attempts => {
                tracing::error!("{} failed after {} attempts: {}", label, attempt, e);
                return Err(e);
            }
            Err(e) => {
                let delay = backoff.delay_after(attempt);
                tracing::warn!(
                    "{} failed (attempt {}/{}), retrying in {:?}: {}",
                    label,
                    attempt,
                    attempts,
                    delay,
                    e
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast() -> Backoff {
        Backoff {
            attempts: 3,
            initial_delay: Duration::from_millis(1),
            max_delay: Duration::from_millis(5),
        }
    }

    /// Expected: delays double per attempt and stop at the cap
    #[test]
    fn delay_doubles_until_capped() {
        let backoff = Backoff {
            attempts: 10,
            initial_delay: Duration::from_secs(30),
            max_delay: Duration::from_secs(100),
        };

        assert_eq!(backoff.delay_after(1), Duration::from_secs(30));
        assert_eq!(backoff.delay_after(2), Duration::from_secs(60));
        assert_eq!(backoff.delay_after(3), Duration::from_secs(100));
        assert_eq!(backoff.delay_after(40), Duration::from_secs(100));
    }

    /// Expected: Ok after the operation recovers on its second attempt
    #[tokio::test]
    async fn succeeds_after_transient_failure() {
        let calls = AtomicU32::new(0);

        let result: Result<u32, String> = retry_with_backoff("test", fast(), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst) + 1;
            if n < 2 {
                Err("transient".to_string())
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    /// Expected: Err with the last error once all attempts are used
    #[tokio::test]
    async fn gives_up_after_configured_attempts() {
        let calls = AtomicU32::new(0);

        let result: Result<(), String> = retry_with_backoff("test", fast(), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err("down".to_string())
        })
        .await;

        assert_eq!(result, Err("down".to_string()));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}
