//! Fixed-delay backoff policy.

use std::time::Duration;

use crate::config::RetryConfig;

/// Immutable retry policy for rate-limited upstream calls.
///
/// `max_attempts` counts every call, the first one included, so a policy of
/// 5 attempts sleeps at most 4 times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    delay: Duration,
}

impl RetryPolicy {
    /// Attempts made before giving up on a rate-limited call.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

    /// Pause between two attempts.
    pub const DEFAULT_DELAY: Duration = Duration::from_secs(3);

    /// Build a policy; at least one attempt is always made.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::fixed(config.max_attempts, Duration::from_millis(config.delay_ms))
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Delay to wait after `attempt` (1-based) was rate limited, or `None`
    /// once the attempts are exhausted.
    pub fn delay_after(&self, attempt: u32) -> Option<Duration> {
        (attempt < self.max_attempts).then_some(self.delay)
    }

    /// Total time spent sleeping when every attempt is rate limited.
    pub fn worst_case_wait(&self) -> Duration {
        self.delay * (self.max_attempts - 1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(Self::DEFAULT_MAX_ATTEMPTS, Self::DEFAULT_DELAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 5);
        assert_eq!(policy.delay(), Duration::from_secs(3));
        assert_eq!(policy.worst_case_wait(), Duration::from_secs(12));
    }

    #[test]
    fn test_delay_after_stops_at_last_attempt() {
        let policy = RetryPolicy::default();
        for attempt in 1..5 {
            assert_eq!(policy.delay_after(attempt), Some(Duration::from_secs(3)));
        }
        assert_eq!(policy.delay_after(5), None);
    }

    #[test]
    fn test_zero_attempts_clamped() {
        let policy = RetryPolicy::fixed(0, Duration::from_millis(10));
        assert_eq!(policy.max_attempts(), 1);
        assert_eq!(policy.delay_after(1), None);
        assert_eq!(policy.worst_case_wait(), Duration::ZERO);
    }

    #[test]
    fn test_from_config() {
        let policy = RetryPolicy::from_config(&RetryConfig {
            max_attempts: 2,
            delay_ms: 250,
        });
        assert_eq!(policy, RetryPolicy::fixed(2, Duration::from_millis(250)));
    }
}
