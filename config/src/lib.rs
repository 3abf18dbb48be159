//! # Configuration Management for typecol
//!
//! This crate provides centralized configuration structures for column codecs
//! and migration rendering.
//!
//! ## Quick Start
//!
//! ### Programmatic Configuration
//! ```rust
//! use config::{AppConfig, StorageConfig};
//! use type_mapping::ColumnType;
//!
//! let config = AppConfig {
//!     storage: StorageConfig::new(ColumnType::jsonb()),
//!     ..AppConfig::default()
//! };
//! assert!(!config.codec.validate_on_write);
//! ```
//!
//! ### TOML File Configuration
//! ```toml
//! [storage]
//! default_impl = "jsonb"
//!
//! [codec]
//! validate_on_write = true
//!
//! [render]
//! dialect = "postgresql"
//! sqlalchemy_module_prefix = "sa."
//! user_module_prefix = "typecol."
//! ```
//!
//! Every section and key is optional and falls back to its default.
//!
//! Load configuration:
//! ```rust,no_run
//! use config::AppConfig;
//!
//! // Load from typecol.toml
//! let config = AppConfig::load()?;
//!
//! // Or load from custom path
//! let config = AppConfig::from_file("config/production.toml")?;
//! # Ok::<(), config::ConfigError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::{env, path::Path};
use thiserror::Error;
use type_mapping::{ColumnType, Dialect};

const DEFAULT_CONFIG_PATH: &str = "./typecol.toml";
const CONFIG_PATH_ENV: &str = "TYPECOL_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Environment variable error: {0}")]
    Env(#[from] env::VarError),
    #[error("Dotenvy error: {0}")]
    Dotenvy(#[from] dotenvy::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageConfig,
    pub codec: CodecConfig,
    pub render: RenderConfig,
}

/// Storage column configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Column type used by codecs constructed from configuration
    pub default_impl: ColumnType,
}

/// Codec behaviour configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Re-validate every serialized primitive before it is written
    pub validate_on_write: bool,
}

/// Migration rendering configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub dialect: Dialect,
    pub sqlalchemy_module_prefix: String,
    pub user_module_prefix: Option<String>,
}

impl AppConfig {
    /// Load configuration from TOML file specified in .env or defaults
    pub fn load() -> Result<Self, ConfigError> {
        // A missing .env file is fine, a malformed one is not
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                return Err(err.into());
            }
        }

        let config = if let Ok(config_path) = env::var(CONFIG_PATH_ENV) {
            Self::from_file(&config_path)
        } else if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::from_file(DEFAULT_CONFIG_PATH)
        } else {
            Err(ConfigError::Invalid(format!(
                "Config path must be specified in .env file as {} or in {} file",
                CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH
            )))
        }?;

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        Self::validate_prefix(
            "sqlalchemy_module_prefix",
            &self.render.sqlalchemy_module_prefix,
        )?;
        if let Some(prefix) = &self.render.user_module_prefix {
            Self::validate_prefix("user_module_prefix", prefix)?;
        }

        Ok(())
    }

    fn validate_prefix(key: &str, prefix: &str) -> Result<(), ConfigError> {
        if prefix.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "Render {} cannot be empty",
                key
            )));
        }
        if !prefix.ends_with('.') {
            return Err(ConfigError::Invalid(format!(
                "Render {} must end with '.', got '{}'",
                key, prefix
            )));
        }
        Ok(())
    }
}

impl StorageConfig {
    /// Create a new storage configuration
    pub fn new(default_impl: ColumnType) -> Self {
        Self { default_impl }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            default_impl: ColumnType::Json,
        }
    }
}

impl CodecConfig {
    /// Create a new codec configuration
    pub fn new(validate_on_write: bool) -> Self {
        Self { validate_on_write }
    }
}

impl RenderConfig {
    /// Create a new render configuration
    pub fn new(
        dialect: Dialect,
        sqlalchemy_module_prefix: String,
        user_module_prefix: Option<String>,
    ) -> Self {
        Self {
            dialect,
            sqlalchemy_module_prefix,
            user_module_prefix,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            dialect: Dialect::Default,
            sqlalchemy_module_prefix: "sa.".to_string(),
            user_module_prefix: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.default_impl, ColumnType::Json);
        assert_eq!(config.render.sqlalchemy_module_prefix, "sa.");
    }

    #[test]
    fn test_full_document() {
        let config = AppConfig::from_toml_str(
            r#"
            [storage]
            default_impl = "jsonb"

            [codec]
            validate_on_write = true

            [render]
            dialect = "postgresql"
            sqlalchemy_module_prefix = "sa."
            user_module_prefix = "typecol."
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.default_impl, ColumnType::PgJsonb);
        assert!(config.codec.validate_on_write);
        assert_eq!(config.render.dialect, Dialect::Postgres);
        assert_eq!(config.render.user_module_prefix.as_deref(), Some("typecol."));
    }

    #[test]
    fn test_unknown_column_type_is_rejected() {
        let err = AppConfig::from_toml_str("[storage]\ndefault_impl = \"blob\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_prefix_validation() {
        let err = AppConfig::from_toml_str("[render]\nsqlalchemy_module_prefix = \"\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = AppConfig::from_toml_str("[render]\nuser_module_prefix = \"models\"\n")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("user_module_prefix")));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[storage]\ndefault_impl = \"varchar(512)\"").unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.storage.default_impl, ColumnType::varchar(512));
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::from_file("/definitely/not/here/typecol.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
