//! Configuration management module
//!
//! Handles validation and loading of run parameters: how many concurrent
//! attempts per set, how many sets, and the expected node count if the
//! caller knows it in advance.

use crate::{BenchGateError, Result, APP_NAME, CONFIG_FILE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Parameters of one validation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of concurrent bench attempts per set
    pub threads: usize,
    /// Number of times the whole batch is repeated
    pub sets: usize,
    /// Expected node count; a mismatch fails the run
    #[serde(default)]
    pub expected_nodes: Option<u64>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threads: 1,
            sets: 1,
            expected_nodes: None,
        }
    }
}

impl RunConfig {
    /// Create a new run configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of concurrent attempts per set
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the number of sets
    pub fn with_sets(mut self, sets: usize) -> Self {
        self.sets = sets;
        self
    }

    /// Set the expected node count
    pub fn with_expected_nodes(mut self, expected: Option<u64>) -> Self {
        self.expected_nodes = expected;
        self
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(BenchGateError::ConfigError(
                "Thread count must be greater than 0".to_string(),
            ));
        }

        if self.sets == 0 {
            return Err(BenchGateError::ConfigError(
                "Set count must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from the standard config file location
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(|e| {
            BenchGateError::ConfigError(format!(
                "Failed to read config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            BenchGateError::ConfigError(format!(
                "Failed to parse config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to the standard config file location
    pub fn save(&self) -> Result<()> {
        self.validate()?;

        let config_path = Self::config_file_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                BenchGateError::ConfigError(format!(
                    "Failed to create config directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            BenchGateError::ConfigError(format!("Failed to serialize configuration: {}", e))
        })?;

        fs::write(&config_path, content).map_err(|e| {
            BenchGateError::ConfigError(format!(
                "Failed to write config file {}: {}",
                config_path.display(),
                e
            ))
        })?;

        Ok(())
    }

    /// Get the standard configuration file path
    /// Uses $CONFIG_HOME/benchgate/benchgate.toml
    pub fn config_file_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            BenchGateError::ConfigError("Unable to determine config directory".to_string())
        })?;

        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(RunConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let config = RunConfig::new().with_threads(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_sets_rejected() {
        let config = RunConfig::new().with_sets(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_any_positive_counts_accepted() {
        // Any positive counts are valid; test workers run with high
        // thread counts
        assert!(RunConfig::new()
            .with_threads(96)
            .with_sets(64)
            .validate()
            .is_ok());
        assert!(RunConfig::new().with_threads(1).with_sets(1).validate().is_ok());
    }

    #[test]
    fn test_toml_serialization() {
        let config = RunConfig::new()
            .with_threads(8)
            .with_sets(2)
            .with_expected_nodes(Some(123_456));
        let toml_str = toml::to_string(&config).expect("Failed to serialize to TOML");
        let back: RunConfig = toml::from_str(&toml_str).expect("Failed to deserialize from TOML");

        assert_eq!(back.threads, 8);
        assert_eq!(back.sets, 2);
        assert_eq!(back.expected_nodes, Some(123_456));
    }

    #[test]
    fn test_expected_nodes_defaults_to_none() {
        let back: RunConfig = toml::from_str("threads = 4\nsets = 2\n").expect("parse");
        assert_eq!(back.expected_nodes, None);
    }

    #[test]
    fn test_config_file_path() {
        let path = RunConfig::config_file_path().expect("config path");
        assert!(path.to_string_lossy().contains("benchgate"));
        assert!(path.to_string_lossy().contains("benchgate.toml"));
    }
}
