//! `segfilter` Configuration Module
//!
//! Provides configuration file support via `segfilter.toml`, environment
//! variables, and defaults.
//!
//! # Priority (highest to lowest)
//!
//! 1. Environment variables (`SEGFILTER_*`, sections separated by `__`)
//! 2. Configuration file (`segfilter.toml`)
//! 3. Default values

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::filter::DEFAULT_RELATION_FIELD_NAMES;
use crate::sequence::{DEFAULT_GROUP_LABEL, DEFAULT_IDENTIFIER_PREFIX};

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue {
        /// Configuration key that failed validation.
        key: String,
        /// Validation error message.
        message: String,
    },
}

/// Relation matching section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RelationsConfig {
    /// Relation field names a segment filter matches against.
    pub field_names: Vec<String>,
}

impl Default for RelationsConfig {
    fn default() -> Self {
        Self {
            field_names: DEFAULT_RELATION_FIELD_NAMES
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }
}

impl RelationsConfig {
    /// Checks that at least one non-blank field name is configured.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_names.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "relations.field_names".to_string(),
                message: "at least one relation field name is required".to_string(),
            });
        }

        if let Some(blank) = self
            .field_names
            .iter()
            .position(|name| name.trim().is_empty())
        {
            return Err(ConfigError::InvalidValue {
                key: "relations.field_names".to_string(),
                message: format!("entry {blank} is blank"),
            });
        }

        Ok(())
    }
}

/// Table naming section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TablesConfig {
    /// Prefix of entity tables (`object_<class>`).
    pub object_prefix: String,
    /// Prefix of relation tables (`object_relations_<class>`).
    pub relations_prefix: String,
    /// Id column of entity tables.
    pub id_column: String,
}

impl Default for TablesConfig {
    fn default() -> Self {
        Self {
            object_prefix: "object_".to_string(),
            relations_prefix: "object_relations_".to_string(),
            id_column: "o_id".to_string(),
        }
    }
}

impl TablesConfig {
    /// Checks that prefixes and the id column are plain SQL identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written verbatim into table names and join conditions.
        check_identifiers(&[
            ("tables.object_prefix", &self.object_prefix),
            ("tables.relations_prefix", &self.relations_prefix),
            ("tables.id_column", &self.id_column),
        ])
    }
}

/// Filter identifier section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifierConfig {
    /// Leading part of every filter identifier.
    pub prefix: String,
    /// Label used instead of a group id for ungrouped filters.
    pub default_group: String,
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_IDENTIFIER_PREFIX.to_string(),
            default_group: DEFAULT_GROUP_LABEL.to_string(),
        }
    }
}

impl IdentifierConfig {
    /// Checks that both identifier parts are plain SQL identifiers.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Written verbatim into join aliases.
        check_identifiers(&[
            ("identifier.prefix", &self.prefix),
            ("identifier.default_group", &self.default_group),
        ])
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level: error, warn, info, debug, trace.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Returns an `EnvFilter`-style directive scoping the level to this crate.
    #[must_use]
    pub fn directive(&self) -> String {
        format!("segfilter_core={}", self.level)
    }
}

/// Main `segfilter` configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SegFilterConfig {
    /// Relation matching configuration.
    pub relations: RelationsConfig,
    /// Table naming configuration.
    pub tables: TablesConfig,
    /// Filter identifier configuration.
    pub identifier: IdentifierConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl SegFilterConfig {
    /// Loads configuration from default sources.
    ///
    /// Priority: defaults < file < environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_path("segfilter.toml")
    }

    /// Loads configuration from a specific file path.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("SEGFILTER_").split("__"));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Creates a configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Self::default()))
            .merge(Toml::string(toml_str));

        figment
            .extract()
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.relations.validate()?;
        self.tables.validate()?;
        self.identifier.validate()?;

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "logging.level".to_string(),
                message: format!(
                    "value '{}' is invalid, expected one of: {:?}",
                    self.logging.level, valid_levels
                ),
            });
        }

        Ok(())
    }

    /// Serializes the configuration to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

fn check_identifiers(values: &[(&str, &String)]) -> Result<(), ConfigError> {
    for (key, value) in values {
        if !is_sql_identifier(value) {
            return Err(ConfigError::InvalidValue {
                key: (*key).to_string(),
                message: format!("value '{value}' must be non-empty and contain only [A-Za-z0-9_]"),
            });
        }
    }
    Ok(())
}

/// Returns true if `value` can be used unquoted as part of a table, column or alias name.
pub(crate) fn is_sql_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
