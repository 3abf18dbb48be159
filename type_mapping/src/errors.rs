//! Error types for type mapping
//!
//! This module defines the errors raised while parsing column type names
//! and resolving column types for a dialect.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeMappingError {
    #[error("Column type {column_type} is not supported by dialect {dialect}")]
    UnsupportedType {
        column_type: String,
        dialect: &'static str,
    },

    #[error("Unknown column type: {0}")]
    UnknownColumnType(String),

    #[error("Unknown dialect: {0}")]
    UnknownDialect(String),
}
