use anyhow::{Context, Result};
use article_index_core::service::IndexSettings;
use article_index_core::{DEFAULT_CAPACITY, DEFAULT_TOP_K};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub indexes: IndexConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default = "default_url")]
    pub url: String,
    /// Reconnect attempts made by the connection manager before a command
    /// fails with a storage error.
    #[serde(default = "default_retries")]
    pub retries: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: default_url(),
            retries: default_retries(),
        }
    }
}

fn default_url() -> String {
    "redis://127.0.0.1:6379/".to_string()
}
fn default_retries() -> usize {
    2
}

#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            top_k: default_top_k(),
        }
    }
}

fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}
fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

impl IndexConfig {
    pub fn settings(&self) -> IndexSettings {
        IndexSettings {
            capacity: self.capacity,
            top_k: self.top_k,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "info".to_string()
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_config(&content)
}

pub fn parse_config(content: &str) -> Result<Config> {
    let config: Config = toml::from_str(content).with_context(|| "Failed to parse config file")?;

    // Validate indexes
    if config.indexes.capacity == 0 {
        anyhow::bail!("indexes.capacity must be >= 1");
    }
    if config.indexes.top_k == 0 {
        anyhow::bail!("indexes.top_k must be >= 1");
    }

    // Validate store
    let url = config.store.url.as_str();
    if !["redis://", "rediss://", "unix://"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
    {
        anyhow::bail!(
            "store.url must start with redis://, rediss:// or unix:// (got '{}')",
            url
        );
    }

    Ok(config)
}
