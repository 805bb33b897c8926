//! Retry loop for rate-limited upstream calls.
//!
//! Only a "too many requests" outcome is retried; any other failure is
//! returned as soon as it happens. Exhausting the policy while still rate
//! limited turns into an internal service error.

use std::future::Future;

use crate::employee::EmployeeError;
use crate::observability::metrics;
use crate::resilience::backoff::RetryPolicy;

/// Outcome of a single failed attempt.
#[derive(Debug)]
pub enum AttemptError {
    /// Upstream answered 429; worth another try.
    RateLimited,
    /// Anything else; surfaced unchanged.
    Failed(EmployeeError),
}

impl From<EmployeeError> for AttemptError {
    fn from(err: EmployeeError) -> Self {
        Self::Failed(err)
    }
}

/// Run `call` until it succeeds, fails for a reason other than rate
/// limiting, or the policy runs out of attempts.
pub async fn retry_rate_limited<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &'static str,
    mut call: F,
) -> Result<T, EmployeeError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AttemptError>>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match call().await {
            Ok(value) => return Ok(value),
            Err(AttemptError::Failed(err)) => return Err(err),
            Err(AttemptError::RateLimited) => match policy.delay_after(attempt) {
                Some(delay) => {
                    tracing::warn!(
                        operation,
                        attempt,
                        delay = ?delay,
                        "Upstream rate limited, retrying"
                    );
                    metrics::record_retry(operation);
                    tokio::time::sleep(delay).await;
                }
                None => {
                    tracing::error!(operation, attempts = attempt, "Upstream rate limit retries exhausted");
                    return Err(EmployeeError::InternalService(format!(
                        "Service is temporarily unavailable : upstream still rate limited after {attempt} attempts"
                    )));
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_on_last_attempt() {
        let calls = AtomicU32::new(0);
        let calls = &calls;
        let start = Instant::now();

        let result = retry_rate_limited(&RetryPolicy::default(), "fetch", move || async move {
            if calls.fetch_add(1, Ordering::SeqCst) < 4 {
                Err(AttemptError::RateLimited)
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 5);
        assert_eq!(start.elapsed(), Duration::from_secs(12));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_becomes_internal_service() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let result: Result<(), _> = retry_rate_limited(&RetryPolicy::default(), "fetch", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::RateLimited)
        })
        .await;

        assert!(matches!(result, Err(EmployeeError::InternalService(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_other_failures_are_not_retried() {
        let calls = AtomicU32::new(0);
        let calls = &calls;

        let result: Result<(), _> = retry_rate_limited(&RetryPolicy::default(), "create", move || async move {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AttemptError::Failed(EmployeeError::CreateFailed(
                "Failed to create employee".into(),
            )))
        })
        .await;

        assert!(matches!(result, Err(EmployeeError::CreateFailed(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
