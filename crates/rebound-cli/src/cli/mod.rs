//! CLI for the rebound retry and error-classification demo.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use rebound_core::config;
use rebound_core::error::ErrorCategory;
use rebound_core::simulate::Scenario;
use rebound_core::validation::SignupForm;
use std::path::PathBuf;

use commands::{
    run_categories, run_completions, run_fetch, run_flaky, run_man, run_report, run_validate,
    RetryOverrides,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "rebound")]
#[command(about = "rebound: classified errors and exponential-backoff retry", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/rebound/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run a simulated fetch that succeeds or fails with a canonical error.
    Fetch {
        /// success, network, validation, server, timeout or auth.
        scenario: Scenario,
        /// Wrap the fetch in the retry loop.
        #[arg(long)]
        retry: bool,
        /// Retries after the first attempt (overrides config).
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Base backoff delay in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        base_delay_ms: Option<u64>,
        /// Simulated latency of each attempt in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        latency_ms: Option<u64>,
    },

    /// Retry an operation that fails a fixed number of times before succeeding.
    Flaky {
        /// Failures before the first success.
        #[arg(long, default_value = "2", value_name = "N")]
        failures: u32,
        /// Category of the injected failure.
        #[arg(long, default_value = "network")]
        category: ErrorCategory,
        /// Retries after the first attempt (overrides config).
        #[arg(long, value_name = "N")]
        max_retries: Option<u32>,
        /// Base backoff delay in milliseconds (overrides config).
        #[arg(long, value_name = "MS")]
        base_delay_ms: Option<u64>,
    },

    /// Validate sign-up form fields.
    Validate {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        age: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        confirm_password: Option<String>,
    },

    /// Print the JSON error report for a category's canonical failure.
    Report {
        category: ErrorCategory,
    },

    /// List error categories, their codes and retry convention.
    Categories,

    /// Generate shell completions.
    Completions {
        shell: Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                scenario,
                retry,
                max_retries,
                base_delay_ms,
                latency_ms,
            } => {
                let overrides = RetryOverrides {
                    max_retries,
                    base_delay_ms,
                };
                run_fetch(&cfg, scenario, retry, overrides, latency_ms).await?
            }
            CliCommand::Flaky {
                failures,
                category,
                max_retries,
                base_delay_ms,
            } => {
                let overrides = RetryOverrides {
                    max_retries,
                    base_delay_ms,
                };
                run_flaky(&cfg, failures, category, overrides).await?
            }
            CliCommand::Validate {
                email,
                age,
                password,
                confirm_password,
            } => run_validate(SignupForm {
                email: email.unwrap_or_default(),
                age: age.unwrap_or_default(),
                password: password.unwrap_or_default(),
                confirm_password: confirm_password.unwrap_or_default(),
            })?,
            CliCommand::Report { category } => run_report(category)?,
            CliCommand::Categories => run_categories(),
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
