//! Tracing subscriber setup for the `articles` binary.
//!
//! `RUST_LOG` wins when set; otherwise the config's `logging.filter` applies.
//! Events go to stderr so stdout carries only command output.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::EnvFilter;

use crate::config::LoggingConfig;

pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = resolve_filter(env.as_deref(), config)?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

/// Pick the filter directives: a non-empty `RUST_LOG` value, else the config.
fn resolve_filter(env: Option<&str>, config: &LoggingConfig) -> Result<EnvFilter> {
    match env.map(str::trim).filter(|v| !v.is_empty()) {
        Some(directives) => EnvFilter::try_new(directives)
            .with_context(|| format!("Invalid RUST_LOG '{}'", directives)),
        None => EnvFilter::try_new(&config.filter)
            .with_context(|| format!("Invalid logging.filter '{}'", config.filter)),
    }
}
