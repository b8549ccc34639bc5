//! TOML configuration for ledgers, leaderboards and logging.
//!
//! Every section is optional:
//!
//! ```toml
//! [ledger]
//! default_budget = 1000
//! allow_self_scoring = false
//!
//! [ranking]
//! high = 80.0
//! mid = 50.0
//! no_feedback_label = "No feedback"
//!
//! [logging]
//! level = "info"
//! format = "text"
//! output = "stderr"
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::ledger::LedgerPolicy;
use crate::ranker::RankingPolicy;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ledger: LedgerPolicy,
    pub ranking: RankingPolicy,
    pub logging: LoggingConfig,
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Subscriber settings used by the CLI.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive, e.g. `"info"` or `"pollscore=debug"`.
    pub level: String,
    pub format: LogFormat,
    /// `"stdout"`, `"stderr"`, or a file path to append to.
    pub output: String,
    /// ANSI colors, only honored when writing to a terminal.
    pub color: bool,
    /// Include the event target (module path).
    pub target: bool,
    pub timestamps: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: LogFormat::Text,
            output: "stderr".to_string(),
            color: true,
            target: false,
            timestamps: true,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.display().to_string(), e))?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.ledger.default_budget == 0 {
            return Err(ConfigError::Invalid(
                "ledger.default_budget must be positive".to_string(),
            ));
        }
        let thresholds = &self.ranking.thresholds;
        if !thresholds.high.is_finite() || !thresholds.mid.is_finite() {
            return Err(ConfigError::Invalid(
                "ranking thresholds must be finite numbers".to_string(),
            ));
        }
        if thresholds.mid > thresholds.high {
            return Err(ConfigError::Invalid(format!(
                "ranking.mid ({}) must not exceed ranking.high ({})",
                thresholds.mid, thresholds.high
            )));
        }
        Ok(())
    }
}

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{0}': {1}")]
    Io(String, std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}
