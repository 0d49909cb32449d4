//! Toolkit configuration management
//!
//! Handles loading default behaviour for the apply family from TOML files and
//! `APPLY_*` environment variables.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::types::LevelOrder;

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A configuration source could not be read or deserialised
    #[error("Configuration source error: {0}")]
    Load(#[from] config::ConfigError),

    /// TOML text could not be parsed
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Default behaviour of the apply family.
///
/// Explicit arguments to the engine functions always win; these values are
/// only consulted by the `Toolkit` facade.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ApplyConfig {
    /// Whether `sapply`/`mapply`/`tapply` simplify their results
    pub simplify: bool,
    /// Whether `split`/`tapply` omit empty groups
    pub drop_empty: bool,
    /// Level ordering for factors built from raw labels
    pub level_order: LevelOrder,
    /// Separator between labels of a composite key
    pub separator: String,
    /// Label unnamed character inputs by their own values
    pub use_names: bool,
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            simplify: true,
            drop_empty: false,
            level_order: LevelOrder::Sorted,
            separator: ".".to_string(),
            use_names: true,
        }
    }
}

impl ApplyConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ApplyConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from all sources
    ///
    /// Priority (highest to lowest):
    /// 1. `APPLY_*` environment variables
    /// 2. Config file, when `path` is given
    /// 3. Default values
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(config::Environment::with_prefix("APPLY"));

        let config: ApplyConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator.is_empty() {
            return Err(ConfigError::Invalid(
                "separator must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
