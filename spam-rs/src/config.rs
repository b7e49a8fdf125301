//! Configuration for spam-rs

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpamError};
use crate::model::ModelConfig;
use crate::spam::{KeywordCatalog, ScoringConfig, DEFAULT_THRESHOLD};

/// Main configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub scoring: ScoringSection,
    #[serde(default)]
    pub model: ModelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:5000")
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// Scoring configuration as written in the file
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScoringSection {
    /// Adjusted probability at or above which a message is SPAM
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Replaces the built-in keyword catalog when set
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// "pretty" or "json"
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
        }
    }
}

impl Default for ScoringSection {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            keywords: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| SpamError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)
            .map_err(|e| SpamError::Config(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.scoring_config()?;

        match self.logging.format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(SpamError::Config(format!(
                    "Unknown log format '{}', expected 'pretty' or 'json'",
                    other
                )))
            }
        }

        Ok(())
    }

    /// Build the immutable scoring configuration
    pub fn scoring_config(&self) -> Result<ScoringConfig> {
        let catalog = match &self.scoring.keywords {
            Some(keywords) => KeywordCatalog::new(keywords)?,
            None => KeywordCatalog::default(),
        };

        ScoringConfig::new(self.scoring.threshold, catalog)
    }
}
