//! Terminal rendering of classified errors.

use rebound_core::error::AppError;
use rebound_core::tracker::RetryTracker;

/// One-line note on whether the user may try again.
pub fn retry_hint(error: &AppError, tracker: &RetryTracker) -> &'static str {
    if tracker.can_offer_retry(error) {
        "retryable: yes (run again to try again)"
    } else if error.is_retryable() {
        "retryable: yes, but max retries reached"
    } else {
        "retryable: no"
    }
}

pub fn print_app_error(error: &AppError, tracker: &RetryTracker) {
    match error.code() {
        Some(code) => println!("{} [{}]", error.category().title(), code),
        None => println!("{}", error.category().title()),
    }
    println!("  {}", error.message());
    if let Some(details) = error.details() {
        match serde_json::to_string_pretty(details) {
            Ok(json) => {
                println!("  details:");
                for line in json.lines() {
                    println!("    {line}");
                }
            }
            Err(e) => tracing::warn!("could not render error details: {}", e),
        }
    }
    if let Some(label) = tracker.attempt_label() {
        println!("  {label}");
    }
    println!("  {}", retry_hint(error, tracker));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebound_core::error::ErrorCategory;
    use rebound_core::simulate::canonical_error;

    #[test]
    fn hint_follows_budget_and_flag() {
        let network = canonical_error(ErrorCategory::Network);
        let mut tracker = RetryTracker::new(1);
        assert_eq!(retry_hint(&network, &tracker), "retryable: yes (run again to try again)");
        tracker.record_retry();
        assert_eq!(retry_hint(&network, &tracker), "retryable: yes, but max retries reached");
        let auth = canonical_error(ErrorCategory::Auth);
        assert_eq!(retry_hint(&auth, &RetryTracker::new(3)), "retryable: no");
    }
}
