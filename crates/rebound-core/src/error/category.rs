//! Closed set of failure categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// High-level classification of a failure.
///
/// Categories are flat and independent; there is no hierarchy between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    /// Could not reach the remote side (connection refused, DNS, 503 from a proxy).
    Network,
    /// The request itself is malformed; retrying cannot help.
    Validation,
    /// The remote side failed while handling the request.
    Server,
    /// The operation did not complete in time.
    Timeout,
    /// Missing or rejected credentials.
    Auth,
}

/// Returned when a category name cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid error category {0:?} (expected one of network, validation, server, timeout, auth)")]
pub struct InvalidCategory(pub String);

impl ErrorCategory {
    pub const ALL: [ErrorCategory; 5] = [
        ErrorCategory::Network,
        ErrorCategory::Validation,
        ErrorCategory::Server,
        ErrorCategory::Timeout,
        ErrorCategory::Auth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::Validation => "validation",
            ErrorCategory::Server => "server",
            ErrorCategory::Timeout => "timeout",
            ErrorCategory::Auth => "auth",
        }
    }

    /// Whether failures of this category are usually transient.
    ///
    /// This is a convention only; every call site still decides the flag
    /// it passes to [`create_error`](crate::error::create_error).
    pub fn conventionally_retryable(self) -> bool {
        match self {
            ErrorCategory::Network | ErrorCategory::Timeout | ErrorCategory::Server => true,
            ErrorCategory::Validation | ErrorCategory::Auth => false,
        }
    }

    /// Machine-readable code used by the canonical failures of this category.
    pub fn default_code(self) -> &'static str {
        match self {
            ErrorCategory::Network => "NETWORK_ERROR",
            ErrorCategory::Validation => "VALIDATION_ERROR",
            ErrorCategory::Server => "INTERNAL_ERROR",
            ErrorCategory::Timeout => "TIMEOUT_ERROR",
            ErrorCategory::Auth => "AUTH_ERROR",
        }
    }

    /// Heading used when rendering an error to a user.
    pub fn title(self) -> &'static str {
        match self {
            ErrorCategory::Network => "Network Error",
            ErrorCategory::Validation => "Validation Error",
            ErrorCategory::Server => "Server Error",
            ErrorCategory::Timeout => "Timeout Error",
            ErrorCategory::Auth => "Auth Error",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ErrorCategory {
    type Err = InvalidCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ErrorCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == lower)
            .ok_or_else(|| InvalidCategory(s.to_string()))
    }
}
