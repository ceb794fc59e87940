//! CLI command handlers. Each command is in its own file.

mod categories;
mod completions;
mod fetch;
mod flaky;
mod render;
mod report;
mod validate;

pub use categories::run_categories;
pub use completions::{run_completions, run_man};
pub use fetch::run_fetch;
pub use flaky::run_flaky;
pub use report::run_report;
pub use validate::run_validate;

use rebound_core::config::ReboundConfig;
use rebound_core::retry::RetryPolicy;
use std::time::Duration;

/// Per-invocation overrides of the configured retry policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOverrides {
    pub max_retries: Option<u32>,
    pub base_delay_ms: Option<u64>,
}

impl RetryOverrides {
    pub fn apply(self, cfg: &ReboundConfig) -> RetryPolicy {
        let mut policy = cfg.retry_policy();
        if let Some(n) = self.max_retries {
            policy.max_retries = n;
        }
        if let Some(ms) = self.base_delay_ms {
            policy.base_delay = Duration::from_millis(ms);
        }
        policy
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebound_core::config::RetryConfig;

    #[test]
    fn overrides_replace_config_values() {
        let cfg = ReboundConfig {
            retry: Some(RetryConfig {
                max_retries: 5,
                base_delay_ms: 500,
            }),
            simulate: None,
        };
        let policy = RetryOverrides {
            max_retries: Some(1),
            base_delay_ms: None,
        }
        .apply(&cfg);
        assert_eq!(policy, RetryPolicy::new(1, 500));
        assert_eq!(RetryOverrides::default().apply(&cfg), RetryPolicy::new(5, 500));
    }
}
