//! `rebound fetch` – run a simulated fetch, optionally under the retry loop.

use anyhow::{bail, Result};
use rebound_core::config::ReboundConfig;
use rebound_core::error::AppError;
use rebound_core::retry::with_retry;
use rebound_core::simulate::{simulate_fetch, FetchSuccess, Scenario};
use rebound_core::tracker::RetryTracker;
use std::cell::Cell;
use std::time::{Duration, Instant};

use super::render::print_app_error;
use super::RetryOverrides;

/// Outcome of one `fetch` invocation.
#[derive(Debug)]
pub struct FetchRun {
    pub result: Result<FetchSuccess, AppError>,
    /// Calls made to the simulated operation.
    pub attempts: u32,
    pub tracker: RetryTracker,
    pub elapsed: Duration,
}

/// Tracker state after a run that made `attempts` calls: every call past the
/// first counts as a retry against the same budget.
pub fn tracker_after_run(max_retries: u32, attempts: u32) -> RetryTracker {
    let mut tracker = RetryTracker::new(max_retries);
    for _ in 1..attempts {
        tracker.record_retry();
    }
    tracker
}

pub async fn execute_fetch(
    cfg: &ReboundConfig,
    scenario: Scenario,
    retry: bool,
    overrides: RetryOverrides,
    latency_ms: Option<u64>,
) -> FetchRun {
    let latency = latency_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cfg.simulate().latency(scenario));
    let policy = overrides.apply(cfg);
    let attempts = Cell::new(0u32);
    let started = Instant::now();

    let result = if retry {
        with_retry(&policy, || {
            attempts.set(attempts.get() + 1);
            simulate_fetch(scenario, latency)
        })
        .await
    } else {
        attempts.set(1);
        simulate_fetch(scenario, latency).await
    };

    FetchRun {
        result,
        attempts: attempts.get(),
        tracker: tracker_after_run(policy.max_retries, attempts.get()),
        elapsed: started.elapsed(),
    }
}

pub async fn run_fetch(
    cfg: &ReboundConfig,
    scenario: Scenario,
    retry: bool,
    overrides: RetryOverrides,
    latency_ms: Option<u64>,
) -> Result<()> {
    let run = execute_fetch(cfg, scenario, retry, overrides, latency_ms).await;
    let summary = format!(
        "  attempts: {} ({:.1}s)",
        run.attempts,
        run.elapsed.as_secs_f64()
    );

    match run.result {
        Ok(ok) => {
            println!("{}", ok.data);
            println!("  timestamp: {}", ok.timestamp);
            println!("{summary}");
            Ok(())
        }
        Err(e) => {
            print_app_error(&e, &run.tracker);
            println!("{summary}");
            bail!("{} fetch failed after {} attempt(s)", scenario, run.attempts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebound_core::config::RetryConfig;
    use rebound_core::error::ErrorCategory;

    fn cfg(max_retries: u32) -> ReboundConfig {
        ReboundConfig {
            retry: Some(RetryConfig {
                max_retries,
                base_delay_ms: 1,
            }),
            simulate: None,
        }
    }

    #[test]
    fn tracker_counts_every_call_past_the_first() {
        let t = tracker_after_run(3, 1);
        assert_eq!(t.retry_count(), 0);
        assert!(t.has_retries_left());
        assert_eq!(t.attempt_label(), None);

        let t = tracker_after_run(3, 4);
        assert_eq!(t.retry_count(), 3);
        assert!(!t.has_retries_left());
        assert_eq!(t.attempt_label().as_deref(), Some("Attempt 4 of 4"));
        assert_eq!(t.progress_percent(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retry_run_uses_whole_budget() {
        let run = execute_fetch(&cfg(3), Scenario::Network, true, RetryOverrides::default(), Some(0)).await;
        assert_eq!(run.attempts, 4);
        let err = run.result.unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Network);
        assert!(!run.tracker.can_offer_retry(&err));
        assert_eq!(run.tracker.attempt_label().as_deref(), Some("Attempt 4 of 4"));
    }

    #[tokio::test(start_paused = true)]
    async fn single_failed_fetch_still_offers_retry() {
        let run = execute_fetch(&cfg(3), Scenario::Server, false, RetryOverrides::default(), Some(0)).await;
        assert_eq!(run.attempts, 1);
        let err = run.result.unwrap_err();
        assert!(run.tracker.can_offer_retry(&err));
    }

    #[tokio::test(start_paused = true)]
    async fn non_retryable_scenario_stops_after_one_attempt() {
        let run = execute_fetch(&cfg(3), Scenario::Auth, true, RetryOverrides::default(), Some(0)).await;
        assert_eq!(run.attempts, 1);
        let err = run.result.unwrap_err();
        assert!(!run.tracker.can_offer_retry(&err));
    }

    #[tokio::test(start_paused = true)]
    async fn overrides_change_attempt_count() {
        let overrides = RetryOverrides {
            max_retries: Some(1),
            base_delay_ms: Some(0),
        };
        let run = execute_fetch(&cfg(5), Scenario::Timeout, true, overrides, Some(0)).await;
        assert_eq!(run.attempts, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn run_fetch_exit_status() {
        assert!(run_fetch(&cfg(2), Scenario::Success, true, RetryOverrides::default(), Some(0))
            .await
            .is_ok());
        let err = run_fetch(&cfg(2), Scenario::Timeout, true, RetryOverrides::default(), Some(0))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("after 3 attempt(s)"));
        assert!(run_fetch(&cfg(2), Scenario::Validation, false, RetryOverrides::default(), Some(0))
            .await
            .is_err());
    }
}
