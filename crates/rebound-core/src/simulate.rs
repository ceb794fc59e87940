//! Simulated operations that succeed or fail with a canonical [`AppError`]
//! after an artificial delay. Front ends wrap these in the retry loop to
//! show how each category behaves.

use crate::error::{create_error, AppError, ErrorCategory, ErrorOptions};
use crate::report::unix_timestamp;
use serde::Serialize;
use serde_json::json;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

/// Outcome a simulated fetch is scripted to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    Success,
    Network,
    Validation,
    Server,
    Timeout,
    Auth,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid scenario {0:?} (expected success, network, validation, server, timeout or auth)")]
pub struct InvalidScenario(pub String);

impl Scenario {
    /// Failure category this scenario produces, `None` for success.
    pub fn category(self) -> Option<ErrorCategory> {
        match self {
            Scenario::Success => None,
            Scenario::Network => Some(ErrorCategory::Network),
            Scenario::Validation => Some(ErrorCategory::Validation),
            Scenario::Server => Some(ErrorCategory::Server),
            Scenario::Timeout => Some(ErrorCategory::Timeout),
            Scenario::Auth => Some(ErrorCategory::Auth),
        }
    }
}

impl From<ErrorCategory> for Scenario {
    fn from(c: ErrorCategory) -> Self {
        match c {
            ErrorCategory::Network => Scenario::Network,
            ErrorCategory::Validation => Scenario::Validation,
            ErrorCategory::Server => Scenario::Server,
            ErrorCategory::Timeout => Scenario::Timeout,
            ErrorCategory::Auth => Scenario::Auth,
        }
    }
}

impl FromStr for Scenario {
    type Err = InvalidScenario;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("success") {
            return Ok(Scenario::Success);
        }
        s.parse::<ErrorCategory>()
            .map(Scenario::from)
            .map_err(|_| InvalidScenario(s.to_string()))
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.category() {
            Some(c) => write!(f, "{c}"),
            None => f.write_str("success"),
        }
    }
}

/// Payload returned by a successful simulated fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchSuccess {
    pub data: String,
    /// Unix seconds at completion.
    pub timestamp: i64,
}

/// The canonical failure for each category.
pub fn canonical_error(category: ErrorCategory) -> AppError {
    match category {
        ErrorCategory::Network => create_error(
            category,
            "Failed to connect to server",
            ErrorOptions::new()
                .code("NETWORK_ERROR")
                .retryable(true)
                .details(json!({ "endpoint": "/api/data", "status": 503 })),
        ),
        ErrorCategory::Validation => create_error(
            category,
            "Invalid request parameters",
            ErrorOptions::new()
                .code("VALIDATION_ERROR")
                .retryable(false)
                .details(json!({ "field": "email", "reason": "Invalid format" })),
        ),
        ErrorCategory::Server => create_error(
            category,
            "Internal server error occurred",
            ErrorOptions::new()
                .code("INTERNAL_ERROR")
                .retryable(true)
                .details(json!({ "timestamp": unix_timestamp(), "trace": "error-trace-123" })),
        ),
        ErrorCategory::Timeout => create_error(
            category,
            "Request timed out",
            ErrorOptions::new()
                .code("TIMEOUT_ERROR")
                .retryable(true)
                .details(json!({ "timeout": 30000, "elapsed": 30001 })),
        ),
        ErrorCategory::Auth => create_error(
            category,
            "Authentication required",
            ErrorOptions::new()
                .code("AUTH_ERROR")
                .retryable(false)
                .details(json!({ "redirectTo": "/login" })),
        ),
    }
}

/// Wait `latency`, then produce the scripted outcome.
pub async fn simulate_fetch(scenario: Scenario, latency: Duration) -> Result<FetchSuccess, AppError> {
    tokio::time::sleep(latency).await;
    match scenario.category() {
        Some(category) => Err(canonical_error(category)),
        None => Ok(FetchSuccess {
            data: "Successfully fetched data!".to_string(),
            timestamp: unix_timestamp(),
        }),
    }
}

/// Operation that fails with a fixed error for its first `failures` calls
/// and succeeds afterwards. Counts every call.
#[derive(Debug)]
pub struct FlakyOperation {
    failures: u32,
    error: AppError,
    calls: AtomicU32,
}

impl FlakyOperation {
    pub fn new(failures: u32, error: AppError) -> Self {
        Self {
            failures,
            error,
            calls: AtomicU32::new(0),
        }
    }

    /// Run once. On success, returns the 1-based number of this call.
    pub async fn call(&self) -> Result<u32, AppError> {
        let n = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if n <= self.failures {
            Err(self.error.clone())
        } else {
            Ok(n)
        }
    }

    pub fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}
