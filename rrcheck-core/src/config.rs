//! Harness configuration
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! pool_capacity = 32
//! label_prefix = "conn"
//! history_capacity = 10
//! overflow = "drop_oldest"
//! ```

use crate::pool::{HandlePool, DEFAULT_LABEL_PREFIX, DEFAULT_POOL_CAPACITY};
use crate::queue::OverflowPolicy;
use crate::recorder::DEFAULT_HISTORY_CAPACITY;
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Number of pre-allocated connection handles
    pub pool_capacity: usize,
    /// Prefix of handle labels
    pub label_prefix: String,
    /// Events kept by each recorder history queue
    pub history_capacity: usize,
    /// Which event a full history queue gives up
    pub overflow: OverflowPolicy,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            pool_capacity: DEFAULT_POOL_CAPACITY,
            label_prefix: DEFAULT_LABEL_PREFIX.to_string(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            overflow: OverflowPolicy::default(),
        }
    }
}

impl HarnessConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HarnessConfig =
            toml::from_str(content).context("Failed to parse harness config")?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: HarnessConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;

        tracing::debug!("Loaded harness config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.pool_capacity == 0 {
            bail!("pool_capacity must be > 0");
        }
        if self.history_capacity == 0 {
            bail!("history_capacity must be > 0");
        }
        if self.label_prefix.is_empty() {
            bail!("label_prefix cannot be empty");
        }
        Ok(())
    }

    /// Build the handle pool this configuration describes
    pub fn build_pool(&self) -> HandlePool {
        HandlePool::with_prefix(self.pool_capacity, &self.label_prefix)
    }
}
