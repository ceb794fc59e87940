//! Manual "try again" bookkeeping for front ends.
//!
//! Separate from the automatic retry loop: this counts retries a user asked
//! for and decides whether another one may be offered.

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryTracker {
    retry_count: u32,
    max_retries: u32,
}

impl Default for RetryTracker {
    fn default() -> Self {
        Self::new(3)
    }
}

impl RetryTracker {
    pub fn new(max_retries: u32) -> Self {
        Self {
            retry_count: 0,
            max_retries,
        }
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn has_retries_left(&self) -> bool {
        self.retry_count < self.max_retries
    }

    /// A retry is offered only for retryable errors while budget remains.
    pub fn can_offer_retry(&self, error: &AppError) -> bool {
        error.is_retryable() && self.has_retries_left()
    }

    pub fn record_retry(&mut self) {
        self.retry_count = self.retry_count.saturating_add(1);
    }

    /// Clear the count after a success or when the error is dismissed.
    pub fn reset(&mut self) {
        self.retry_count = 0;
    }

    /// "Attempt N of M", once at least one retry happened.
    pub fn attempt_label(&self) -> Option<String> {
        if self.retry_count == 0 {
            return None;
        }
        Some(format!(
            "Attempt {} of {}",
            u64::from(self.retry_count) + 1,
            u64::from(self.max_retries) + 1
        ))
    }

    /// Share of the manual budget used, 0..=100.
    pub fn progress_percent(&self) -> u8 {
        if self.max_retries == 0 {
            return 0;
        }
        let pct = u64::from(self.retry_count) * 100 / u64::from(self.max_retries);
        pct.min(100) as u8
    }
}
