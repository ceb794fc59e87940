//! Error reports: a serializable snapshot of an [`AppError`] plus the time it
//! was reported.

use crate::error::{AppError, Details, ErrorCategory};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub category: ErrorCategory,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Details>,
    /// Unix seconds.
    pub reported_at: i64,
}

impl ErrorReport {
    pub fn from_error(error: &AppError, reported_at: i64) -> Self {
        Self {
            category: error.category(),
            message: error.message().to_string(),
            code: error.code().map(str::to_string),
            details: error.details().cloned(),
            reported_at,
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Build a report for `error`, stamp it with the current time and log it.
pub fn report_error(error: &AppError) -> ErrorReport {
    let report = ErrorReport::from_error(error, unix_timestamp());
    match serde_json::to_string(&report) {
        Ok(json) => tracing::info!(category = %report.category, report = %json, "error reported"),
        Err(e) => tracing::warn!("could not serialize error report: {}", e),
    }
    report
}

/// Current time as Unix seconds.
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}
