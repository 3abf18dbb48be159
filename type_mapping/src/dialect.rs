//! SQL dialects
//!
//! A dialect adapts generic column types to its native implementation and
//! rejects types that belong to another dialect.

use crate::errors::TypeMappingError;
use crate::types::ColumnType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target SQL dialect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Dialect {
    /// Dialect-agnostic, column types pass through unchanged
    #[default]
    Default,
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Default => "default",
            Dialect::Postgres => "postgresql",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Adapt a column type to this dialect's implementation
    pub fn type_descriptor(&self, column_type: ColumnType) -> Result<ColumnType, TypeMappingError> {
        let resolved = match (self, column_type) {
            (Dialect::Default, column_type) => column_type,
            (Dialect::Postgres, ColumnType::Json) => ColumnType::PgJson,
            (Dialect::MySql, ColumnType::Json) => ColumnType::MySqlJson,
            (Dialect::Sqlite, ColumnType::Json) => ColumnType::SqliteJson,
            (dialect, column_type) => match column_type.native_dialect() {
                Some(native) if native != *dialect => {
                    return Err(TypeMappingError::UnsupportedType {
                        column_type: column_type.name(),
                        dialect: dialect.name(),
                    });
                }
                _ => column_type,
            },
        };

        debug_log!("[DIALECT] {} resolved column type {}", self.name(), resolved);
        Ok(resolved)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = TypeMappingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "default" => Ok(Dialect::Default),
            "postgresql" | "postgres" | "pg" => Ok(Dialect::Postgres),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" => Ok(Dialect::Sqlite),
            _ => Err(TypeMappingError::UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = TypeMappingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Dialect> for String {
    fn from(value: Dialect) -> Self {
        value.name().to_string()
    }
}
