pub mod config;
pub mod logging;

pub mod error;
pub mod report;
pub mod retry;
pub mod simulate;
pub mod tracker;
pub mod validation;

pub use error::{create_error, AppError, ErrorCategory, ErrorOptions};
pub use retry::{with_retry, with_retry_blocking, RetryPolicy, Retryable};
