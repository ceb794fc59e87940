//! Retry loop: run an operation until success or the policy says stop.

use super::policy::{RetryDecision, RetryPolicy};
use super::retryable::Retryable;
use std::future::Future;
use std::time::Duration;

fn delay_millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

fn log_retry(attempt: u32, delay: Duration) {
    tracing::debug!(
        attempt,
        delay_ms = delay_millis(delay),
        "attempt failed; retrying after backoff"
    );
}

/// Runs `operation` until it succeeds or the policy says to stop.
///
/// On a retryable failure, sleeps for the backoff duration then tries again.
/// The error returned is always the one from the last attempt, unchanged.
pub async fn with_retry<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) => match policy.decide(attempt, e.retry_marker()) {
                RetryDecision::GiveUp(reason) => {
                    tracing::debug!(attempt, ?reason, "retry loop giving up");
                    return Err(e);
                }
                RetryDecision::RetryAfter(delay) => {
                    log_retry(attempt, delay);
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            },
        }
    }
}

/// Blocking equivalent of [`with_retry`] for callers on plain threads.
pub fn with_retry_blocking<T, E, F>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Result<T, E>,
    E: Retryable,
{
    let mut attempt = 0u32;
    loop {
        match operation() {
            Ok(value) => return Ok(value),
            Err(e) => match policy.decide(attempt, e.retry_marker()) {
                RetryDecision::GiveUp(reason) => {
                    tracing::debug!(attempt, ?reason, "retry loop giving up");
                    return Err(e);
                }
                RetryDecision::RetryAfter(delay) => {
                    log_retry(attempt, delay);
                    std::thread::sleep(delay);
                    attempt += 1;
                }
            },
        }
    }
}

/// Positional form: `retry(op, max_retries, base_delay_ms)`.
pub async fn retry<T, E, F, Fut>(operation: F, max_retries: u32, base_delay_ms: u64) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Retryable,
{
    with_retry(&RetryPolicy::new(max_retries, base_delay_ms), operation).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{create_error, AppError, ErrorCategory, ErrorOptions};
    use std::cell::Cell;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn transient(n: u32) -> AppError {
        create_error(
            ErrorCategory::Network,
            format!("attempt {n} failed"),
            ErrorOptions::new().retryable(true),
        )
    }

    #[test]
    fn blocking_returns_last_error() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::new(2, 0);
        let result: Result<(), AppError> = with_retry_blocking(&policy, || {
            calls.set(calls.get() + 1);
            Err(transient(calls.get()))
        });
        assert_eq!(calls.get(), 3);
        assert_eq!(result.unwrap_err().message(), "attempt 3 failed");
    }

    #[test]
    fn blocking_stops_on_explicit_false() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::new(5, 0);
        let result: Result<(), AppError> = with_retry_blocking(&policy, || {
            calls.set(calls.get() + 1);
            Err(AppError::new(ErrorCategory::Validation, "bad input"))
        });
        assert_eq!(calls.get(), 1);
        assert_eq!(result.unwrap_err().category(), ErrorCategory::Validation);
    }

    #[test]
    fn blocking_retries_unmarked_errors_through_budget() {
        let calls = Cell::new(0u32);
        let policy = RetryPolicy::new(3, 0);
        let result: Result<(), std::io::Error> = with_retry_blocking(&policy, || {
            calls.set(calls.get() + 1);
            Err(std::io::Error::other("no marker"))
        });
        assert!(result.is_err());
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn delay_millis_saturates() {
        assert_eq!(delay_millis(Duration::from_millis(250)), 250);
        assert_eq!(delay_millis(Duration::MAX), u64::MAX);
    }

    #[test]
    fn blocking_logs_each_scheduled_retry() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();
        let policy = RetryPolicy::new(2, 0);
        tracing::subscriber::with_default(subscriber, || {
            let _: Result<(), AppError> =
                with_retry_blocking(&policy, || Err(transient(0)));
        });
        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(out.matches("retrying after backoff").count(), 2);
        assert_eq!(out.matches("giving up").count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn async_success_after_failures() {
        let calls = Cell::new(0u32);
        let out = with_retry(&RetryPolicy::new(5, 50), || {
            calls.set(calls.get() + 1);
            let n = calls.get();
            async move {
                if n < 3 {
                    Err(transient(n))
                } else {
                    Ok(n * 10)
                }
            }
        })
        .await;
        assert_eq!(out.unwrap(), 30);
        assert_eq!(calls.get(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn positional_form_uses_given_budget() {
        let calls = Cell::new(0u32);
        let out: Result<(), AppError> = retry(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move { Err(transient(n)) }
            },
            1,
            10,
        )
        .await;
        assert!(out.is_err());
        assert_eq!(calls.get(), 2);
    }
}
