//! Engine configuration.
//!
//! The configuration is a JSON document at a fixed, well-known path inside
//! the analysis container. It is read once at startup and immutable
//! thereafter; without it there is no valid unit of work, so loading
//! failures are fatal before any output is produced.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Analysis configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Paths to analyze, relative to the analysis root, in order.
    pub include_paths: Vec<String>,
    /// Attach a suggested-change diff to each issue (default: true).
    #[serde(default)]
    pub include_diff: Option<bool>,
}

impl Config {
    /// Parse a configuration document from a JSON file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Returns whether issues carry a suggested-change diff (defaults to true).
    pub fn should_include_diff(&self) -> bool {
        self.include_diff.unwrap_or(true)
    }
}
