//! Configuration for the glossary converter

mod logging;
mod reader;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use reader::ReaderConfig;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Dump reader configuration
    #[serde(default)]
    pub reader: ReaderConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration fields
    pub fn validate(&self) -> Result<()> {
        if self.reader.buffer_capacity == 0 {
            anyhow::bail!("reader.buffer_capacity must be greater than zero");
        }
        Ok(())
    }
}
