//! `rebound report` – print the report for a canonical failure.

use anyhow::Result;
use rebound_core::error::ErrorCategory;
use rebound_core::report::report_error;
use rebound_core::simulate::canonical_error;

pub fn run_report(category: ErrorCategory) -> Result<()> {
    let report = report_error(&canonical_error(category));
    println!("{}", report.to_json_pretty()?);
    Ok(())
}
