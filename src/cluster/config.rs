use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

use bureaux::ClusterParams;

/// Optional TOML configuration for the `cluster` binary.
///
/// ```toml
/// [clustering]
/// min_size = 2
/// max_size = 6
/// max_distance_m = 1000.0
/// ```
#[derive(Debug, Default, Deserialize, Clone)]
#[serde(default)]
pub struct Config {
    pub clustering: ClusterParams,
}

impl Config {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        Ok(config)
    }
}
