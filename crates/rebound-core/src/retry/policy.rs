use std::time::Duration;

/// Why the retry loop stopped on an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GiveUpReason {
    /// The error explicitly said it must not be retried.
    NotRetryable,
    /// The failing attempt was the last one the budget allows.
    Exhausted,
}

/// Decision returned by the retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Stop and hand the error back to the caller.
    GiveUp(GiveUpReason),
    /// Retry after the given delay.
    RetryAfter(Duration),
}

/// Bounded exponential backoff without jitter.
///
/// At most `max_retries + 1` attempts are made. The wait after the failing
/// attempt with zero-based index `n` is `base_delay * 2^n`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each one after it.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay_ms: u64) -> Self {
        Self {
            max_retries,
            base_delay: Duration::from_millis(base_delay_ms),
        }
    }

    /// Total attempts including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Delay to wait after the failing attempt with zero-based index `attempt`.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }

    /// Decide what to do after attempt `attempt` (zero-based) failed.
    ///
    /// `marker` is the error's retryability flag, if it carries one. Only an
    /// explicit `Some(false)` stops early; an error without a marker goes
    /// through the normal budget check like a retryable one.
    pub fn decide(&self, attempt: u32, marker: Option<bool>) -> RetryDecision {
        if marker == Some(false) {
            return RetryDecision::GiveUp(GiveUpReason::NotRetryable);
        }
        if attempt >= self.max_retries {
            return RetryDecision::GiveUp(GiveUpReason::Exhausted);
        }
        RetryDecision::RetryAfter(self.backoff(attempt))
    }
}
