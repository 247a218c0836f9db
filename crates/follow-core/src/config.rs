//! Configuration System
//!
//! Loads run parameters from a TOML file. Every section and field has a
//! default, so a partial file only overrides what it names. The loaded
//! config is immutable for the length of a run.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use social_records::CellLayout;

/// Default config file path
pub const DEFAULT_CONFIG_PATH: &str = "follow.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Follow decision tuning
    #[serde(default)]
    pub follow: FollowConfig,
    /// Persona table preparation
    #[serde(default)]
    pub roster: RosterConfig,
    /// Run settings
    #[serde(default)]
    pub run: RunConfig,
    /// Where decision cells land in the social graph sheet
    #[serde(default)]
    pub layout: CellLayout,
}

/// Thresholds and adjustments for the follow decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FollowConfig {
    /// Affinity used when a faction pair has no row
    pub default_affinity: f64,
    /// Below this, same-faction likelihood drops by `likelihood_decrement`
    pub lower_follower_threshold: u64,
    /// Strictly between the thresholds, likelihood rises by `likelihood_increment`
    pub upper_follower_threshold: u64,
    pub likelihood_increment: f64,
    pub likelihood_decrement: f64,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            default_affinity: 0.1,
            lower_follower_threshold: 1000,
            upper_follower_threshold: 10000,
            likelihood_increment: 0.2,
            likelihood_decrement: 0.1,
        }
    }
}

/// Persona table preparation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    /// Keep only this many top-follower personas per faction
    pub max_personas_per_faction: usize,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            max_personas_per_faction: 1000,
        }
    }
}

/// Run settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Dice seed; drawn from entropy when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Log progress every this many pairs (0 disables)
    pub progress_interval: u64,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            progress_interval: 1000,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        content.parse()
    }

    /// Load configuration from the default path, or use defaults if there
    /// is no file there. A file that exists must parse and validate.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load(DEFAULT_CONFIG_PATH)
        } else {
            tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let follow = &self.follow;
        if follow.lower_follower_threshold > follow.upper_follower_threshold {
            return Err(ConfigError::Invalid(format!(
                "lower_follower_threshold ({}) exceeds upper_follower_threshold ({})",
                follow.lower_follower_threshold, follow.upper_follower_threshold
            )));
        }
        for (name, value) in [
            ("default_affinity", follow.default_affinity),
            ("likelihood_increment", follow.likelihood_increment),
            ("likelihood_decrement", follow.likelihood_decrement),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::Invalid(format!("{} must be finite", name)));
            }
        }
        if self.roster.max_personas_per_faction == 0 {
            return Err(ConfigError::Invalid(
                "max_personas_per_faction must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Parse configuration from a TOML string and validate it
    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generates a default configuration file content.
pub fn default_config_toml() -> String {
    r#"# Follow graph simulator configuration

[follow]
default_affinity = 0.1
lower_follower_threshold = 1000
upper_follower_threshold = 10000
likelihood_increment = 0.2
likelihood_decrement = 0.1

[roster]
max_personas_per_faction = 1000

[run]
# seed = 42
progress_interval = 1000

[layout]
first_row = 2
first_column = 4
"#
    .to_string()
}
