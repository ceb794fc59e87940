//! Retry and backoff policy.
//!
//! The policy decides, after each failed attempt, whether to stop or how
//! long to wait; the run helpers drive the attempt/wait loop on top of it.
//! All loop state is local to one call, so concurrent loops never interact.

mod policy;
mod retryable;
mod run;

pub use policy::{GiveUpReason, RetryDecision, RetryPolicy};
pub use retryable::Retryable;
pub use run::{retry, with_retry, with_retry_blocking};
