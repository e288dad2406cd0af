//! Search configuration loaded from TOML.
//!
//! ```toml
//! parallel_root = true
//! max_time_ms = 2000
//!
//! [hard]
//! random_move_probability = 0.0
//! depths = [4, 5]
//! ```
//!
//! Missing tiers fall back to the built-in profiles.

use crate::difficulty::{Difficulty, DifficultyProfile};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when loading or validating a search configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    /// Failed to parse the configuration file as valid TOML.
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("{tier}: random_move_probability must be within [0, 1], got {value}")]
    InvalidProbability { tier: Difficulty, value: f64 },
    #[error("{0}: depths must not be empty")]
    EmptyDepths(Difficulty),
    #[error("{0}: depths must be at least 1")]
    ZeroDepth(Difficulty),
}

/// Profiles for every tier plus search-wide settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Score root moves on worker threads.
    #[serde(default)]
    pub parallel_root: bool,
    /// Per-move time budget. Unlimited when absent.
    #[serde(default)]
    pub max_time_ms: Option<u64>,
    #[serde(default = "DifficultyProfile::easy")]
    pub easy: DifficultyProfile,
    #[serde(default = "DifficultyProfile::medium")]
    pub medium: DifficultyProfile,
    #[serde(default = "DifficultyProfile::hard")]
    pub hard: DifficultyProfile,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            parallel_root: false,
            max_time_ms: None,
            easy: DifficultyProfile::easy(),
            medium: DifficultyProfile::medium(),
            hard: DifficultyProfile::hard(),
        }
    }
}

impl SearchConfig {
    /// Parses and validates a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and a validation
    /// variant for an out-of-range profile.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for tier in Difficulty::ALL {
            self.profile(tier).validate(tier)?;
        }
        Ok(())
    }

    /// Profile for `difficulty`.
    pub fn profile(&self, difficulty: Difficulty) -> &DifficultyProfile {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    pub fn max_time(&self) -> Option<Duration> {
        self.max_time_ms.map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config = SearchConfig::from_toml_str("").unwrap();
        assert_eq!(config, SearchConfig::default());
        assert_eq!(config.max_time(), None);
    }

    #[test]
    fn overrides_single_tier() {
        let config = SearchConfig::from_toml_str(
            r#"
            parallel_root = true
            max_time_ms = 250

            [easy]
            random_move_probability = 0.5
            depths = [1, 2]
            "#,
        )
        .unwrap();
        assert!(config.parallel_root);
        assert_eq!(config.max_time(), Some(Duration::from_millis(250)));
        assert_eq!(config.easy.random_move_probability, 0.5);
        assert_eq!(config.profile(Difficulty::Easy).depths, vec![1, 2]);
        assert_eq!(config.hard, DifficultyProfile::hard());
    }

    #[test]
    fn rejects_out_of_range_probability() {
        let err = SearchConfig::from_toml_str(
            r#"
            [medium]
            random_move_probability = -0.1
            depths = [3]
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidProbability { tier: Difficulty::Medium, .. }));
        assert!(err.to_string().starts_with("medium:"));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = SearchConfig::from_toml_str("parallel_root = maybe").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = SearchConfig::load("/nonexistent/search.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn roundtrips_through_toml() {
        let config = SearchConfig {
            max_time_ms: Some(1000),
            ..SearchConfig::default()
        };
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SearchConfig::from_toml_str(&text).unwrap(), config);
    }
}
