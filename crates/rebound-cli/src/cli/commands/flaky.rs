//! `rebound flaky` – watch the retry loop recover from transient failures.

use anyhow::{bail, Result};
use rebound_core::config::ReboundConfig;
use rebound_core::error::{create_error, ErrorCategory, ErrorOptions};
use rebound_core::retry::with_retry;
use rebound_core::simulate::FlakyOperation;

use super::RetryOverrides;

pub async fn run_flaky(
    cfg: &ReboundConfig,
    failures: u32,
    category: ErrorCategory,
    overrides: RetryOverrides,
) -> Result<()> {
    let policy = overrides.apply(cfg);
    let error = create_error(
        category,
        format!("injected {category} failure"),
        ErrorOptions::new()
            .code(category.default_code())
            .retryable(category.conventionally_retryable()),
    );
    let op = FlakyOperation::new(failures, error);

    match with_retry(&policy, || op.call()).await {
        Ok(n) => {
            println!("succeeded on attempt {} of at most {}", n, policy.max_attempts());
            Ok(())
        }
        Err(e) => bail!(
            "gave up after {} attempt(s): {} ({})",
            op.calls(),
            e,
            e.category()
        ),
    }
}
