//! Generator configuration.
use crate::{random::DEFAULT_MAX_FILL_ATTEMPTS, Error, Result, WeaknessPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of candidates drawn before giving up.
pub const DEFAULT_MAX_ATTEMPTS: usize = 100_000;

/// Configuration for the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Rejection sampling budget.
    pub max_attempts: usize,

    /// Consecutive secure random failures tolerated.
    pub max_fill_attempts: usize,

    /// Weakness heuristic policy.
    pub weakness: WeaknessPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_fill_attempts: DEFAULT_MAX_FILL_ATTEMPTS,
            weakness: Default::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load a generator config from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().is_file() {
            return Err(Error::NotFile(path.as_ref().to_path_buf()));
        }

        let contents = std::fs::read_to_string(path.as_ref())?;
        let config: GeneratorConfig = toml::from_str(&contents)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            max_attempts = config.max_attempts,
            max_fill_attempts = config.max_fill_attempts,
            "config::load",
        );
        Ok(config)
    }
}
