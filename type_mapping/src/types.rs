//! Column type definitions
//!
//! This module provides the physical column types a codec can store its
//! primitive in, and their textual names used by configuration files.

use crate::dialect::Dialect;
use crate::errors::TypeMappingError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical storage column type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColumnType {
    /// Generic JSON, adapted to each dialect's native JSON type on resolution
    Json,
    /// PostgreSQL `JSON`
    PgJson,
    /// PostgreSQL `JSONB`
    PgJsonb,
    /// MySQL `JSON`
    MySqlJson,
    /// SQLite `JSON`
    SqliteJson,
    /// Unbounded text
    Text,
    /// Variable length string, optionally bounded
    String { length: Option<u32> },
}

impl ColumnType {
    pub fn json() -> Self {
        ColumnType::Json
    }

    pub fn jsonb() -> Self {
        ColumnType::PgJsonb
    }

    pub fn text() -> Self {
        ColumnType::Text
    }

    pub fn string() -> Self {
        ColumnType::String { length: None }
    }

    pub fn varchar(length: u32) -> Self {
        ColumnType::String {
            length: Some(length),
        }
    }

    /// Name used in configuration files and error messages
    pub fn name(&self) -> String {
        match self {
            ColumnType::Json => "json".to_string(),
            ColumnType::PgJson => "postgresql.json".to_string(),
            ColumnType::PgJsonb => "postgresql.jsonb".to_string(),
            ColumnType::MySqlJson => "mysql.json".to_string(),
            ColumnType::SqliteJson => "sqlite.json".to_string(),
            ColumnType::Text => "text".to_string(),
            ColumnType::String { length: None } => "string".to_string(),
            ColumnType::String {
                length: Some(length),
            } => format!("varchar({})", length),
        }
    }

    /// The dialect a type belongs to, `None` for generic types
    pub fn native_dialect(&self) -> Option<Dialect> {
        match self {
            ColumnType::PgJson | ColumnType::PgJsonb => Some(Dialect::Postgres),
            ColumnType::MySqlJson => Some(Dialect::MySql),
            ColumnType::SqliteJson => Some(Dialect::Sqlite),
            ColumnType::Json | ColumnType::Text | ColumnType::String { .. } => None,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for ColumnType {
    type Err = TypeMappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(' ', "");
        let column_type = match normalized.as_str() {
            "json" => ColumnType::Json,
            "jsonb" | "postgresql.jsonb" => ColumnType::PgJsonb,
            "postgresql.json" => ColumnType::PgJson,
            "mysql.json" => ColumnType::MySqlJson,
            "sqlite.json" => ColumnType::SqliteJson,
            "text" => ColumnType::Text,
            "string" | "varchar" => ColumnType::string(),
            other => {
                let length = other
                    .strip_prefix("varchar(")
                    .or_else(|| other.strip_prefix("string("))
                    .and_then(|rest| rest.strip_suffix(')'))
                    .and_then(|digits| digits.parse::<u32>().ok())
                    .ok_or_else(|| TypeMappingError::UnknownColumnType(s.to_string()))?;
                ColumnType::varchar(length)
            }
        };
        Ok(column_type)
    }
}

impl TryFrom<String> for ColumnType {
    type Error = TypeMappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnType> for String {
    fn from(value: ColumnType) -> Self {
        value.name()
    }
}
