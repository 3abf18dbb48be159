//! PostgreSQL binding
//!
//! Plugs codecs into sqlx queries: `PgColumn` resolves the codec's storage
//! type for PostgreSQL once, then encodes on bind and decodes on read.
//! `encode` and `decode` hold the column-shape decisions and touch no
//! connection; `bind` and `read` only move their values in and out of sqlx.

use column_codec::TypeDecorator;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::Query;
use sqlx::types::Json;
use sqlx::{Postgres, Row};
use type_mapping::{is_json_storage, ColumnType, Dialect, Primitive, StorageValue};

use crate::errors::TypecolError;

/// A codec bound to a PostgreSQL column
pub struct PgColumn<'a, C: TypeDecorator> {
    codec: &'a C,
    column_type: ColumnType,
}

impl<'a, C: TypeDecorator> PgColumn<'a, C> {
    pub fn new(codec: &'a C) -> Result<Self, TypecolError> {
        let column_type = codec.load_dialect_impl(&Dialect::Postgres)?;
        crate::trace_log!(
            "[PG] {} over {} stored as {}",
            codec.codec_name(),
            codec.schema_name(),
            column_type
        );
        Ok(Self { codec, column_type })
    }

    pub fn column_type(&self) -> &ColumnType {
        &self.column_type
    }

    /// Encode `value` into the shape the column stores
    pub fn encode(&self, value: Option<&C::Value>) -> Result<StorageValue, TypecolError> {
        let primitive = self.codec.process_bind_param(value, &Dialect::Postgres)?;
        Ok(StorageValue::shape(&self.column_type, primitive))
    }

    /// Decode a value as the column stores it
    pub fn decode(&self, stored: StorageValue) -> Result<Option<C::Value>, TypecolError> {
        let value = self
            .codec
            .process_result_value(stored.into_primitive(), &Dialect::Postgres)?;
        Ok(value)
    }

    /// Encode `value` and bind it as the next query parameter
    pub fn bind<'q>(
        &self,
        query: Query<'q, Postgres, PgArguments>,
        value: Option<&C::Value>,
    ) -> Result<Query<'q, Postgres, PgArguments>, TypecolError> {
        let query = match self.encode(value)? {
            StorageValue::Json(value) => query.bind(Json(value)),
            StorageValue::Text(text) => query.bind(text),
            StorageValue::Null if is_json_storage(&self.column_type) => {
                query.bind(None::<Json<Primitive>>)
            }
            StorageValue::Null => query.bind(None::<String>),
        };
        Ok(query)
    }

    /// Read `column` from `row` and decode it
    pub fn read(&self, row: &PgRow, column: &str) -> Result<Option<C::Value>, TypecolError> {
        let stored = if is_json_storage(&self.column_type) {
            StorageValue::from(
                row.try_get::<Option<Json<Primitive>>, _>(column)?
                    .map(|Json(value)| value),
            )
        } else {
            StorageValue::from(row.try_get::<Option<String>, _>(column)?)
        };

        self.decode(stored)
    }
}
