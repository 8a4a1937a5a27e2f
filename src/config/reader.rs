//! Dump reader configuration

use serde::{Deserialize, Serialize};

/// Dump reader configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReaderConfig {
    /// Read buffer capacity in bytes
    #[serde(default = "default_buffer_capacity")]
    pub buffer_capacity: usize,
    /// Maximum entries to produce (None = the whole dump)
    #[serde(default)]
    pub max_entries: Option<u64>,
}

fn default_buffer_capacity() -> usize {
    1024 * 1024
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: default_buffer_capacity(),
            max_entries: None,
        }
    }
}
