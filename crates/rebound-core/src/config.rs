use crate::retry::RetryPolicy;
use crate::simulate::Scenario;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Retries allowed after the first attempt.
    pub max_retries: u32,
    /// Base delay in milliseconds for exponential backoff.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 1000,
        }
    }
}

impl RetryConfig {
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.base_delay_ms)
    }
}

/// Artificial latency (milliseconds) of each simulated operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulateConfig {
    pub success_ms: u64,
    pub network_ms: u64,
    pub validation_ms: u64,
    pub server_ms: u64,
    pub timeout_ms: u64,
    pub auth_ms: u64,
}

impl Default for SimulateConfig {
    fn default() -> Self {
        Self {
            success_ms: 1000,
            network_ms: 1000,
            validation_ms: 800,
            server_ms: 1200,
            timeout_ms: 2000,
            auth_ms: 600,
        }
    }
}

impl SimulateConfig {
    pub fn latency(&self, scenario: Scenario) -> Duration {
        let ms = match scenario {
            Scenario::Success => self.success_ms,
            Scenario::Network => self.network_ms,
            Scenario::Validation => self.validation_ms,
            Scenario::Server => self.server_ms,
            Scenario::Timeout => self.timeout_ms,
            Scenario::Auth => self.auth_ms,
        };
        Duration::from_millis(ms)
    }
}

/// Global configuration loaded from `~/.config/rebound/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReboundConfig {
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
    /// Optional simulated latencies; if missing, the demo defaults are used.
    #[serde(default)]
    pub simulate: Option<SimulateConfig>,
}

impl ReboundConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry.clone().unwrap_or_default().to_policy()
    }

    pub fn simulate(&self) -> SimulateConfig {
        self.simulate.clone().unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rebound")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ReboundConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = ReboundConfig {
            retry: Some(RetryConfig::default()),
            simulate: Some(SimulateConfig::default()),
        };
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    load_from_path(&path)
}

/// Load configuration from an explicit path.
pub fn load_from_path(path: &Path) -> Result<ReboundConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let cfg: ReboundConfig =
        toml::from_str(&data).with_context(|| format!("parsing config {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ReboundConfig::default();
        assert!(cfg.retry.is_none());
        assert_eq!(cfg.retry_policy(), RetryPolicy::default());
        assert_eq!(cfg.simulate().timeout_ms, 2000);
        assert_eq!(cfg.simulate().auth_ms, 600);
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ReboundConfig {
            retry: Some(RetryConfig {
                max_retries: 2,
                base_delay_ms: 250,
            }),
            simulate: Some(SimulateConfig::default()),
        };
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ReboundConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: ReboundConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.retry_policy(), RetryPolicy::new(3, 1000));
        assert_eq!(cfg.simulate(), SimulateConfig::default());
    }

    #[test]
    fn partial_simulate_section_fills_defaults() {
        let toml = r#"
            [retry]
            max_retries = 5
            base_delay_ms = 50

            [simulate]
            network_ms = 10
        "#;
        let cfg: ReboundConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.retry_policy(), RetryPolicy::new(5, 50));
        let sim = cfg.simulate();
        assert_eq!(sim.latency(Scenario::Network), Duration::from_millis(10));
        assert_eq!(sim.latency(Scenario::Server), Duration::from_millis(1200));
    }

    #[test]
    fn partial_retry_section_fills_defaults() {
        let cfg: ReboundConfig = toml::from_str("[retry]\nmax_retries = 1\n").unwrap();
        assert_eq!(cfg.retry_policy(), RetryPolicy::new(1, 1000));
        let cfg: ReboundConfig = toml::from_str("[retry]\nbase_delay_ms = 20\n").unwrap();
        assert_eq!(cfg.retry_policy(), RetryPolicy::new(3, 20));
    }

    #[test]
    fn load_from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[retry]\nmax_retries = 0\nbase_delay_ms = 1\n").unwrap();
        let cfg = load_from_path(&path).unwrap();
        assert_eq!(cfg.retry_policy().max_retries, 0);
    }

    #[test]
    fn load_from_path_reports_bad_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[retry\n").unwrap();
        let err = load_from_path(&path).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config"));
    }
}
