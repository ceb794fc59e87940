//! Error classification.
//!
//! Every failure the demo operations produce is packaged as an [`AppError`]:
//! a category from a closed set, a message, an optional machine-readable
//! code, a retryability flag, and optional structured details. The classifier
//! never recovers from anything; it only records what went wrong.

mod app_error;
mod category;

pub use app_error::{create_error, AppError, Details, ErrorOptions};
pub use category::{ErrorCategory, InvalidCategory};
