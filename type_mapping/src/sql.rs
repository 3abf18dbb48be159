//! SQL type conversion utilities
//!
//! This module maps column types to the type names used in DDL.

use crate::types::ColumnType;

/// Map a column type to its SQL type name for DDL generation
pub fn column_type_sql(column_type: &ColumnType) -> String {
    match column_type {
        ColumnType::Json
        | ColumnType::PgJson
        | ColumnType::MySqlJson
        | ColumnType::SqliteJson => "JSON".to_string(),
        ColumnType::PgJsonb => "JSONB".to_string(),
        ColumnType::Text => "TEXT".to_string(),
        ColumnType::String { length: None } => "VARCHAR".to_string(),
        ColumnType::String {
            length: Some(length),
        } => format!("VARCHAR({})", length),
    }
}

/// Check if a column stores its value as a JSON document rather than text
pub fn is_json_storage(column_type: &ColumnType) -> bool {
    matches!(
        column_type,
        ColumnType::Json
            | ColumnType::PgJson
            | ColumnType::PgJsonb
            | ColumnType::MySqlJson
            | ColumnType::SqliteJson
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_type_sql() {
        assert_eq!(column_type_sql(&ColumnType::PgJsonb), "JSONB");
        assert_eq!(column_type_sql(&ColumnType::PgJson), "JSON");
        assert_eq!(column_type_sql(&ColumnType::MySqlJson), "JSON");
        assert_eq!(column_type_sql(&ColumnType::Text), "TEXT");
        assert_eq!(column_type_sql(&ColumnType::string()), "VARCHAR");
        assert_eq!(column_type_sql(&ColumnType::varchar(255)), "VARCHAR(255)");
    }

    #[test]
    fn test_is_json_storage() {
        assert!(is_json_storage(&ColumnType::Json));
        assert!(is_json_storage(&ColumnType::PgJsonb));
        assert!(is_json_storage(&ColumnType::SqliteJson));
        assert!(!is_json_storage(&ColumnType::Text));
        assert!(!is_json_storage(&ColumnType::varchar(8)));
    }
}
