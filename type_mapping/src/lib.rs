//! Unified type mapping between storage column types and SQL dialects
//! This crate provides the dialect resolution logic shared by every column codec

/// Conditional debug logging macros
/// These macros only compile in code when the `debug-logging` feature is enabled
#[cfg(feature = "debug-logging")]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*)
    };
}

#[cfg(not(feature = "debug-logging"))]
macro_rules! debug_log {
    ($($arg:tt)*) => {};
}

pub mod descriptor;
pub mod dialect;
pub mod errors;
pub mod sql;
pub mod types;
pub mod value;

pub use descriptor::{DialectImplCache, StorageDescriptor};
pub use dialect::Dialect;
pub use errors::TypeMappingError;
pub use sql::{column_type_sql, is_json_storage};
pub use types::ColumnType;
pub use value::{Primitive, StorageValue};
