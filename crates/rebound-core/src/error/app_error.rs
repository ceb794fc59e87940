//! Classified failure record and its constructor.

use super::category::ErrorCategory;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Free-form diagnostic payload attached to an [`AppError`].
pub type Details = Map<String, Value>;

/// A classified failure.
///
/// Built once at the point of failure and never mutated afterwards; the
/// retry loop hands the last one back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, thiserror::Error)]
#[error("{message}")]
pub struct AppError {
    category: ErrorCategory,
    message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    code: Option<String>,
    #[serde(default)]
    retryable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    details: Option<Details>,
}

/// Optional fields for [`create_error`]. Omitted fields stay unset and
/// `retryable` defaults to `false`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorOptions {
    pub code: Option<String>,
    pub retryable: Option<bool>,
    pub details: Option<Details>,
}

impl ErrorOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn retryable(mut self, retryable: bool) -> Self {
        self.retryable = Some(retryable);
        self
    }

    /// Attach diagnostics. A JSON object is stored as-is; any other JSON
    /// value is stored under the key `"value"`.
    pub fn details(mut self, details: Value) -> Self {
        self.details = Some(match details {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                map
            }
        });
        self
    }
}

/// Build an [`AppError`]. Pure construction; no side effects.
pub fn create_error(
    category: ErrorCategory,
    message: impl Into<String>,
    options: ErrorOptions,
) -> AppError {
    AppError {
        category,
        message: message.into(),
        code: options.code,
        retryable: options.retryable.unwrap_or(false),
        details: options.details,
    }
}

impl AppError {
    /// Shorthand for `create_error(category, message, ErrorOptions::default())`.
    pub fn new(category: ErrorCategory, message: impl Into<String>) -> Self {
        create_error(category, message, ErrorOptions::default())
    }

    pub fn category(&self) -> ErrorCategory {
        self.category
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    pub fn is_retryable(&self) -> bool {
        self.retryable
    }

    pub fn details(&self) -> Option<&Details> {
        self.details.as_ref()
    }

    /// Look up a single diagnostic field.
    pub fn detail(&self, key: &str) -> Option<&Value> {
        self.details.as_ref().and_then(|d| d.get(key))
    }
}
