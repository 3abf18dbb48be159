//! Error types for the typecol crate
//!
//! This module contains the error type returned by the facade layer: the
//! registry, the Postgres binding and configuration loading. Codecs themselves
//! return `ValidationError` unwrapped.

use column_codec::ValidationError;
use config::ConfigError;
use thiserror::Error;
use type_mapping::TypeMappingError;

#[derive(Error, Debug)]
pub enum TypecolError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Type mapping error: {0}")]
    TypeMapping(#[from] TypeMappingError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Codec not found: {0}")]
    CodecNotFound(String),

    #[error("Codec for column {name} is not a {expected}")]
    CodecTypeMismatch { name: String, expected: &'static str },

    #[error("Codec already registered: {0}")]
    CodecAlreadyRegistered(String),
}
